//! Ancestor-scoped namespace resolution
//!
//! Namespaces are declared through ordinary `xmlns`/`xmlns:prefix`
//! attributes and scoped to the declaring element and its descendants
//! unless a closer declaration shadows them. There is no separate scope
//! stack: the tree itself is the scope, so resolution is a plain walk from
//! the element to the root. Every lookup terminates at the root and yields
//! an empty string when nothing declares the name, never an error.
//!
//! On top of the direct declarations sits a per-element "optional
//! namespace" registry: URI -> prefix bindings that are only materialized
//! into a real `xmlns:` attribute when [`Element::use_namespace`] asks for
//! them.

use crate::core::element::Element;
use indexmap::IndexMap;

impl Element {
    /// Get the part of the name after the first colon, or the whole name
    pub fn local_name(&self) -> String {
        let data = self.data();
        match data.name.split_once(':') {
            Some((_, local)) => local.to_string(),
            None => data.name.clone(),
        }
    }

    /// Resolve the namespace this element's name lives in
    ///
    /// A prefixed name resolves the prefix against `xmlns:<prefix>`
    /// declarations on this element and its ancestors, closest wins. An
    /// unprefixed name resolves the default `xmlns` the same way. Returns
    /// an empty string when nothing in scope declares it.
    pub fn namespace(&self) -> String {
        let name = self.name();
        match name.split_once(':') {
            Some((prefix, _)) => self.resolve_declaration(&format!("xmlns:{prefix}")),
            None => self.resolve_declaration("xmlns"),
        }
    }

    /// Resolve the default (unprefixed) namespace in scope
    ///
    /// Unlike [`Element::namespace`] this ignores any prefix on the
    /// element's own name.
    pub fn default_namespace(&self) -> String {
        self.resolve_declaration("xmlns")
    }

    /// Walk self -> root for the closest non-absent value of `key`
    fn resolve_declaration(&self, key: &str) -> String {
        let mut current = Some(self.clone());
        while let Some(element) = current {
            if let Some(value) = element.get_attribute(key) {
                return value;
            }
            current = element.parent();
        }
        String::new()
    }

    /// Build the namespace context in scope at this element
    ///
    /// The result maps namespace URI -> prefix, merging the parent's
    /// context (computed root-first) with this element's own
    /// `xmlns:<prefix>` declarations. A closer declaration for the same URI
    /// overrides an ancestor's prefix.
    pub fn namespace_context(&self) -> IndexMap<String, String> {
        let mut context = match self.parent() {
            Some(parent) => parent.namespace_context(),
            None => IndexMap::new(),
        };
        let data = self.data();
        for (key, value) in &data.attributes {
            if let (Some(prefix), Some(uri)) = (key.strip_prefix("xmlns:"), value) {
                context.insert(uri.clone(), prefix.to_string());
            }
        }
        context
    }

    /// Find the node that brought a namespace into scope
    ///
    /// A node qualifies when it carries an `xmlns:<prefix>` attribute equal
    /// to `namespace`, or has `namespace` registered as an optional
    /// namespace. The walk recurses to the root first, so the HIGHEST
    /// qualifying ancestor wins over a closer one, and ancestors win over
    /// self.
    pub fn namespace_declaring_ancestor(&self, namespace: &str) -> Option<Element> {
        if let Some(parent) = self.parent() {
            if let Some(found) = parent.namespace_declaring_ancestor(namespace) {
                return Some(found);
            }
        }
        self.declares_namespace(namespace).then(|| self.clone())
    }

    fn declares_namespace(&self, namespace: &str) -> bool {
        let data = self.data();
        data.optional_namespaces.contains_key(namespace)
            || data.attributes.iter().any(|(key, value)| {
                key.starts_with("xmlns:") && value.as_deref() == Some(namespace)
            })
    }

    /// Register a namespace -> prefix binding without declaring it yet
    ///
    /// No `xmlns:` attribute is emitted until [`Element::use_namespace`]
    /// materializes the binding.
    pub fn add_optional_namespace(&self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.data_mut()
            .optional_namespaces
            .insert(namespace.into(), prefix.into());
    }

    /// Declare a namespace, preferring a previously registered prefix
    ///
    /// If `namespace` has an optional-namespace binding on this element,
    /// that binding's prefix overrides the caller-supplied one. The
    /// resolved prefix is materialized as a real `xmlns:<prefix>` attribute
    /// and returned.
    pub fn use_namespace(&self, prefix: &str, namespace: &str) -> String {
        let resolved = self
            .data()
            .optional_namespaces
            .get(namespace)
            .cloned()
            .unwrap_or_else(|| prefix.to_string());
        self.set_attribute_verbatim(&format!("xmlns:{resolved}"), Some(namespace));
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(Element::new("stream:features").local_name(), "features");
        assert_eq!(Element::new("message").local_name(), "message");
        // Split at the first colon only.
        assert_eq!(Element::new("a:b:c").local_name(), "b:c");
    }

    #[test]
    fn test_unresolved_namespace_is_empty() {
        let root = Element::new("root");
        let child = Element::new("p:child");
        root.append_child(child.clone());
        assert_eq!(child.namespace(), "");
        assert_eq!(child.default_namespace(), "");
        assert_eq!(root.namespace(), "");
    }

    #[test]
    fn test_prefixed_namespace_from_ancestor() {
        let root = Element::new("root");
        root.set_attribute("xmlns:p", Some("urn:x"));
        let child = Element::new("p:foo");
        root.append_child(child.clone());
        assert_eq!(child.namespace(), "urn:x");
        assert_eq!(child.local_name(), "foo");
    }

    #[test]
    fn test_closest_declaration_shadows() {
        let root = Element::new("root");
        root.set_attribute("xmlns:p", Some("urn:far"));
        let middle = Element::new("middle");
        middle.set_attribute("xmlns:p", Some("urn:near"));
        root.append_child(middle.clone());
        let leaf = Element::new("p:leaf");
        middle.append_child(leaf.clone());
        assert_eq!(leaf.namespace(), "urn:near");
    }

    #[test]
    fn test_default_namespace_inherits() {
        let root = Element::new("root");
        root.set_attribute("xmlns", Some("urn:default"));
        let child = Element::new("child");
        root.append_child(child.clone());
        assert_eq!(child.namespace(), "urn:default");
        assert_eq!(child.default_namespace(), "urn:default");

        // A prefixed name still resolves the default namespace via
        // default_namespace(), but not via namespace().
        let prefixed = Element::new("p:other");
        root.append_child(prefixed.clone());
        assert_eq!(prefixed.default_namespace(), "urn:default");
        assert_eq!(prefixed.namespace(), "");
    }

    #[test]
    fn test_namespace_context_merge_and_override() {
        let root = Element::new("root");
        root.set_attribute("xmlns:a", Some("urn:one"));
        root.set_attribute("xmlns:b", Some("urn:two"));
        let child = Element::new("child");
        child.set_attribute("xmlns:c", Some("urn:one"));
        root.append_child(child.clone());

        let context = child.namespace_context();
        // The closer declaration for urn:one wins.
        assert_eq!(context.get("urn:one").map(String::as_str), Some("c"));
        assert_eq!(context.get("urn:two").map(String::as_str), Some("b"));
        assert_eq!(context.get("urn:absent"), None);
    }

    #[test]
    fn test_get_attribute_ns() {
        let root = Element::new("root");
        root.set_attribute("xmlns:v", Some("urn:vcard"));
        let child = Element::new("child");
        child.set_attribute("v:version", Some("4.0"));
        root.append_child(child.clone());

        assert_eq!(
            child.get_attribute_ns("version", "urn:vcard"),
            Some("4.0".to_string())
        );
        assert_eq!(child.get_attribute_ns("version", "urn:unknown"), None);
    }

    #[test]
    fn test_declaring_ancestor_highest_wins() {
        let root = Element::new("root");
        root.set_attribute("xmlns:a", Some("urn:x"));
        let middle = Element::new("middle");
        middle.set_attribute("xmlns:b", Some("urn:x"));
        root.append_child(middle.clone());
        let leaf = Element::new("leaf");
        middle.append_child(leaf.clone());

        assert_eq!(leaf.namespace_declaring_ancestor("urn:x"), Some(root));
        assert_eq!(leaf.namespace_declaring_ancestor("urn:missing"), None);
    }

    #[test]
    fn test_declaring_ancestor_sees_optional_namespaces() {
        let root = Element::new("root");
        root.add_optional_namespace("opt", "urn:lazy");
        let leaf = Element::new("leaf");
        root.append_child(leaf.clone());

        assert_eq!(leaf.namespace_declaring_ancestor("urn:lazy"), Some(root.clone()));
        // Registration alone declares nothing on the wire.
        assert_eq!(root.get_attribute("xmlns:opt"), None);
    }

    #[test]
    fn test_use_namespace_prefers_registered_prefix() {
        let element = Element::new("x");
        element.add_optional_namespace("z", "urn:y");
        assert_eq!(element.use_namespace("q", "urn:y"), "z");
        assert_eq!(element.get_attribute("xmlns:z"), Some("urn:y".to_string()));
        assert_eq!(element.get_attribute("xmlns:q"), None);
    }

    #[test]
    fn test_use_namespace_without_registration() {
        let element = Element::new("x");
        assert_eq!(element.use_namespace("q", "urn:y"), "q");
        assert_eq!(element.get_attribute("xmlns:q"), Some("urn:y".to_string()));
    }

    #[test]
    fn test_absent_declaration_is_undeclared() {
        let root = Element::new("root");
        root.set_attribute("xmlns:p", Some("urn:x"));
        let child = Element::new("p:foo");
        // Clearing the declaration on the child does not shadow the parent:
        // an absent value reads the same as no attribute at all.
        child.set_attribute("xmlns:p", None);
        root.append_child(child.clone());
        assert_eq!(child.namespace(), "urn:x");
    }
}
