//! Canonical interchange projection
//!
//! Maps an element tree to and from the `{name, attributes, children}`
//! interchange shape, carried as a [`serde_json::Value`]: attributes become
//! an object of strings with absent entries stripped, text children become
//! plain strings, and element children recurse. The projection is
//! round-trippable: feeding the value back through [`Element::from_value`]
//! rebuilds an equivalent live tree with parent links restored.

use crate::core::element::{Element, Node};
use crate::core::error::{StanzaError, StanzaResult};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::str::FromStr;

impl Element {
    /// Project the element and its subtree into an interchange value
    pub fn to_value(&self) -> Value {
        let data = self.data();

        let mut attributes = Map::new();
        for (key, value) in &data.attributes {
            if let Some(value) = value {
                attributes.insert(key.clone(), Value::String(value.clone()));
            }
        }

        let children = data
            .children
            .iter()
            .map(|child| match child {
                Node::Text(text) => Value::String(text.clone()),
                Node::Element(element) => element.to_value(),
            })
            .collect();

        let mut object = Map::new();
        object.insert("name".to_string(), Value::String(data.name.clone()));
        object.insert("attributes".to_string(), Value::Object(attributes));
        object.insert("children".to_string(), Value::Array(children));
        Value::Object(object)
    }

    /// Rebuild a live tree from an interchange value
    ///
    /// This is the "plain tree-shaped children" arm of construction:
    /// element children are recursively instantiated with their parent link
    /// set, string children become text nodes. Attribute values are kept
    /// verbatim, so an empty string survives. `attributes` and `children`
    /// may be omitted entirely.
    pub fn from_value(value: &Value) -> StanzaResult<Element> {
        let object = value
            .as_object()
            .ok_or_else(|| StanzaError::BadValue("expected an element object".to_string()))?;
        let name = object
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StanzaError::BadValue("element is missing a string name".to_string()))?;
        let element = Element::new(name);

        if let Some(attributes) = object.get("attributes") {
            let attributes = attributes.as_object().ok_or_else(|| {
                StanzaError::BadValue("attributes must be an object".to_string())
            })?;
            for (key, value) in attributes {
                match value {
                    Value::String(value) => element.set_attribute_verbatim(key, Some(value)),
                    Value::Null => element.set_attribute_verbatim(key, None),
                    other => {
                        return Err(StanzaError::BadValue(format!(
                            "attribute '{key}' must be a string, got {other}"
                        )))
                    }
                }
            }
        }

        if let Some(children) = object.get("children") {
            let children = children
                .as_array()
                .ok_or_else(|| StanzaError::BadValue("children must be an array".to_string()))?;
            for child in children {
                match child {
                    Value::String(text) => {
                        element.append_child(Node::Text(text.clone()));
                    }
                    Value::Object(_) => {
                        element.append_child(Node::Element(Element::from_value(child)?));
                    }
                    other => {
                        return Err(StanzaError::BadValue(format!(
                            "child must be a string or element object, got {other}"
                        )))
                    }
                }
            }
        }

        Ok(element)
    }
}

impl FromStr for Element {
    type Err = StanzaError;

    /// Parse an element from interchange JSON text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Element::from_value(&value)
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Element {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Element::from_value(&value).map_err(D::Error::custom)
    }
}
