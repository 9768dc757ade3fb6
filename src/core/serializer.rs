//! Stanza text serializer
//!
//! Emits standard XML element syntax: elements, attributes, and text only.
//! No XML declaration, no DOCTYPE, no comments or processing instructions.
//!
//! Escaping is delegated to quick-xml's pure escape functions:
//! [`escape`] for attribute values (covers `&`, `<`, `>`, `"`) and
//! [`partial_escape`] for text content (covers `&`, `<`, `>`).

use crate::core::element::{Element, Node};
use quick_xml::escape::{escape, partial_escape};
use std::fmt;

impl Element {
    /// Render the opening tag
    ///
    /// Emits `<name` followed by every attribute with a non-absent value as
    /// ` key="escaped-value"`, then `/>` when `allow_self_close` is set and
    /// the element has no children, otherwise `>`.
    pub fn open_tag(&self, allow_self_close: bool) -> String {
        let data = self.data();
        let mut out = String::new();
        out.push('<');
        out.push_str(&data.name);
        for (key, value) in &data.attributes {
            let Some(value) = value else { continue };
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if allow_self_close && data.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
        }
        out
    }

    /// Render the closing tag
    pub fn close_tag(&self) -> String {
        format!("</{}>", self.name())
    }

    /// Render the element and its subtree as XML text
    ///
    /// A childless element renders as a single self-closed tag. Any child,
    /// even an empty text node, forces an explicit open/close pair.
    pub fn serialize(&self) -> String {
        let mut out = self.open_tag(true);
        let children = self.children();
        if children.is_empty() {
            return out;
        }
        for child in &children {
            match child {
                Node::Text(text) => out.push_str(&partial_escape(text.as_str())),
                Node::Element(element) => out.push_str(&element.serialize()),
            }
        }
        out.push_str(&self.close_tag());
        out
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}
