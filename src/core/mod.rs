//! Stanza core module
//!
//! This module contains the element tree itself and everything that operates
//! on it: construction and mutation, namespace resolution, serialization,
//! and the interchange projection.

pub mod element;
pub mod error;
pub mod interchange;
pub mod namespace;
pub mod serializer;

pub use element::{Element, Node};
pub use error::{StanzaError, StanzaResult};
