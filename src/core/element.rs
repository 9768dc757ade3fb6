//! Stanza element tree
//!
//! This module defines the node types of the stanza data model:
//! - Element: a named node with ordered attributes and ordered children
//! - Text: a plain string leaf with no identity
//!
//! An `Element` is a cheap handle (`Rc<RefCell<..>>`) onto shared node data,
//! so cloning an `Element` clones the handle, not the subtree. The parent
//! link is a non-owning `Weak` back-reference: ownership always runs
//! parent-to-child through the child list.

use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// A child node in the stanza tree
#[derive(Debug, Clone)]
pub enum Node {
    /// An element child
    Element(Element),
    /// A raw text child
    Text(String),
}

impl Node {
    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Get the element, if this is an element node
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Get the text, if this is a text node
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Element(_) => None,
            Node::Text(text) => Some(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[derive(Debug)]
pub(crate) struct ElementData {
    pub(crate) name: String,
    /// Insertion-ordered, tri-state values: a key mapped to `None` is an
    /// explicitly absent attribute, distinct from `Some("")`.
    pub(crate) attributes: IndexMap<String, Option<String>>,
    pub(crate) children: Vec<Node>,
    pub(crate) parent: Option<Weak<RefCell<ElementData>>>,
    /// Namespace URI -> prefix bindings not yet materialized as `xmlns:`
    /// attributes.
    pub(crate) optional_namespaces: IndexMap<String, String>,
}

/// A named node in the stanza tree
///
/// Handle semantics: `Clone` copies the handle, and `PartialEq` compares
/// node identity, not structure. Two handles are equal when they point at
/// the same node.
#[derive(Debug, Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Element {
    /// Create a new element with no attributes and no children
    ///
    /// The name may carry a `prefix:local` form; it is split at the first
    /// colon during namespace resolution.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                name: name.into(),
                attributes: IndexMap::new(),
                children: Vec::new(),
                parent: None,
                optional_namespaces: IndexMap::new(),
            })),
        }
    }

    /// Create an element with attributes and children in one call
    ///
    /// Attribute values are stored verbatim (an empty string stays an empty
    /// string). Element children get their parent link set to the new node.
    /// Interchange-shaped children go through [`Element::from_value`]
    /// instead.
    pub fn build<N, K, V>(
        name: N,
        attributes: impl IntoIterator<Item = (K, V)>,
        children: impl IntoIterator<Item = Node>,
    ) -> Self
    where
        N: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        let element = Element::new(name);
        {
            let mut data = element.inner.borrow_mut();
            for (key, value) in attributes {
                data.attributes.insert(key.into(), Some(value.into()));
            }
        }
        for child in children {
            element.append_child(child);
        }
        element
    }

    pub(crate) fn data(&self) -> Ref<'_, ElementData> {
        self.inner.borrow()
    }

    pub(crate) fn data_mut(&self) -> RefMut<'_, ElementData> {
        self.inner.borrow_mut()
    }

    /// Get the element name, including any prefix
    pub fn name(&self) -> String {
        self.data().name.clone()
    }

    /// Get the parent element, if this element has been appended to one
    pub fn parent(&self) -> Option<Element> {
        let parent = self.data().parent.clone()?;
        parent.upgrade().map(|inner| Element { inner })
    }

    /// Append a child node and return it for chaining
    ///
    /// An element child gets its parent link pointed at this node,
    /// overwriting any previous link. The child is NOT removed from a
    /// previous parent's child list. Appending an ancestor as its own
    /// descendant creates a cycle that no operation detects; keeping the
    /// tree acyclic is a caller obligation.
    pub fn append_child(&self, child: impl Into<Node>) -> Node {
        let child = child.into();
        if let Node::Element(element) = &child {
            element.inner.borrow_mut().parent = Some(Rc::downgrade(&self.inner));
        }
        self.inner.borrow_mut().children.push(child.clone());
        child
    }

    /// Append a text child
    pub fn append_text(&self, text: impl Into<String>) {
        self.append_child(Node::Text(text.into()));
    }

    /// Get all child nodes, in order
    pub fn children(&self) -> Vec<Node> {
        self.data().children.clone()
    }

    /// Set an attribute, normalizing an empty value to "absent"
    ///
    /// `None` clears the attribute (stored as explicitly absent), and so
    /// does `Some("")`. Callers that need to keep an empty-string value use
    /// [`Element::set_attribute_verbatim`].
    pub fn set_attribute(&self, name: &str, value: Option<&str>) {
        let stored = match value {
            Some("") | None => None,
            Some(value) => Some(value.to_string()),
        };
        self.data_mut().attributes.insert(name.to_string(), stored);
    }

    /// Set an attribute, keeping an empty value verbatim
    ///
    /// `None` still clears the attribute; `Some("")` survives as an
    /// empty-string value.
    pub fn set_attribute_verbatim(&self, name: &str, value: Option<&str>) {
        self.data_mut()
            .attributes
            .insert(name.to_string(), value.map(str::to_string));
    }

    /// Get an attribute value by exact name
    ///
    /// An explicitly absent attribute reads the same as a missing one.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.data().attributes.get(name).and_then(|value| value.clone())
    }

    /// Get an attribute value by local name within a namespace
    ///
    /// The namespace is translated to a prefix through the element's
    /// namespace context; an unresolvable namespace yields `None`.
    pub fn get_attribute_ns(&self, name: &str, namespace: &str) -> Option<String> {
        let context = self.namespace_context();
        let prefix = context.get(namespace)?;
        self.get_attribute(&format!("{prefix}:{name}"))
    }

    /// Get the first element child matching a local name
    pub fn get_child(&self, name: &str) -> Option<Element> {
        self.find_children(name, None).into_iter().next()
    }

    /// Get the first element child matching a local name and namespace
    pub fn get_child_ns(&self, name: &str, namespace: &str) -> Option<Element> {
        self.find_children(name, Some(namespace)).into_iter().next()
    }

    /// Get all element children matching a local name, in order
    pub fn get_children(&self, name: &str) -> Vec<Element> {
        self.find_children(name, None)
    }

    /// Get all element children matching a local name and namespace, in order
    pub fn get_children_ns(&self, name: &str, namespace: &str) -> Vec<Element> {
        self.find_children(name, Some(namespace))
    }

    fn find_children(&self, name: &str, namespace: Option<&str>) -> Vec<Element> {
        self.children()
            .into_iter()
            .filter_map(|child| match child {
                Node::Element(element) => Some(element),
                Node::Text(_) => None,
            })
            .filter(|child| {
                child.local_name() == name
                    && namespace.is_none_or(|namespace| child.namespace() == namespace)
            })
            .collect()
    }

    /// Concatenate the direct text children, in order
    ///
    /// Element children are skipped, not descended into.
    pub fn text(&self) -> String {
        self.data()
            .children
            .iter()
            .filter_map(|child| child.as_text())
            .collect()
    }
}
