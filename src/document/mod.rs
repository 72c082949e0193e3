//! Protocol document representation: node kinds and path-addressed access.

pub mod node;
pub mod tree;

pub use node::{FieldNode, FieldNumber, FieldValue, NodeMetadata, ScalarValue};
pub use tree::ProtocolDocument;
