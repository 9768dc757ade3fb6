//! StanzaKit
//!
//! A mutable, in-memory XML element tree for namespace-heavy, stanza-style
//! protocols (XMPP and friends). Elements carry a `prefix:local` name,
//! namespaces are declared through `xmlns`/`xmlns:prefix` attributes, and
//! namespace scope is inherited from ancestors unless overridden.
//!
//! The crate provides tree construction and mutation, ancestor-scoped
//! namespace resolution, namespace-aware attribute/child queries, lazy
//! namespace declaration, escaping-correct text serialization, and a
//! JSON-shaped interchange projection that round-trips back into a live tree.

pub mod core;

pub use crate::core::{Element, Node, StanzaError, StanzaResult};
