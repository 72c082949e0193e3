//! Path-addressed navigation for protocol documents.
//!
//! This module provides the `ProtocolDocument` type: the root aggregate the
//! form engine owns for the lifetime of one wizard session. Nodes are
//! addressed with `FieldPath` values that mix named-field and
//! indexed-collection segments.
//!
//! # Example
//!
//! ```
//! use studybuilder::document::node::{FieldNode, FieldValue, ScalarValue};
//! use studybuilder::document::tree::ProtocolDocument;
//! use studybuilder::fieldpath::FieldPath;
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert(
//!     "title".to_string(),
//!     FieldNode::new(FieldValue::Scalar(Some(ScalarValue::Text("PK study".to_string())))),
//! );
//! let doc = ProtocolDocument::new(FieldNode::new(FieldValue::Record(fields)));
//!
//! let path: FieldPath = "title".parse().unwrap();
//! assert_eq!(doc.get(&path).unwrap().as_text(), Some("PK study"));
//!
//! // Missing paths resolve softly to None, never a panic
//! let missing: FieldPath = "arms[4].name".parse().unwrap();
//! assert!(doc.get(&missing).is_none());
//! ```

use super::node::{FieldNode, FieldValue, ScalarValue};
use crate::fieldpath::{FieldPath, PathSegment};

/// A complete protocol document tree.
///
/// The document is created when the wizard opens, mutated in place by the
/// form engine, and either serialized whole on submission or discarded.
/// There is no partial persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolDocument {
    root: FieldNode,
}

impl ProtocolDocument {
    /// Creates a new document with the given root node.
    pub fn new(root: FieldNode) -> Self {
        Self { root }
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> &FieldNode {
        &self.root
    }

    /// Returns a mutable reference to the root node.
    pub fn root_mut(&mut self) -> &mut FieldNode {
        &mut self.root
    }

    /// Gets an immutable reference to the node at the specified path.
    ///
    /// Returns `None` if:
    /// - A named segment does not exist in the enclosing record
    /// - An index segment is out of bounds for the enclosing collection
    /// - The path attempts to descend through a scalar leaf
    ///
    /// Lookups never fail hard; the wizard shell routinely builds paths for
    /// not-yet-created elements while rendering "add" buttons.
    pub fn get_node(&self, path: &FieldPath) -> Option<&FieldNode> {
        let mut current = &self.root;

        for segment in path.segments() {
            match (segment, current.value()) {
                (PathSegment::Field(name), FieldValue::Record(fields)) => {
                    current = fields.get(name)?;
                }
                (PathSegment::Index(idx), FieldValue::Collection(elements)) => {
                    current = elements.get(*idx)?;
                }
                _ => return None,
            }
        }

        Some(current)
    }

    /// Gets a mutable reference to the node at the specified path.
    ///
    /// Follows the same resolution rules as `get_node`. Obtaining a mutable
    /// reference marks every node along the path as modified.
    pub fn get_node_mut(&mut self, path: &FieldPath) -> Option<&mut FieldNode> {
        let mut current = &mut self.root;

        for segment in path.segments() {
            // Reborrow current to avoid the temporary lifetime issue
            current = match (segment, current.value_mut()) {
                (PathSegment::Field(name), FieldValue::Record(fields)) => fields.get_mut(name)?,
                (PathSegment::Index(idx), FieldValue::Collection(elements)) => {
                    elements.get_mut(*idx)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Reads the scalar value at the specified path.
    ///
    /// Returns `None` when the path does not resolve, resolves to an unset
    /// scalar, or resolves to a record or collection.
    pub fn get(&self, path: &FieldPath) -> Option<&ScalarValue> {
        self.get_node(path)?.as_scalar()
    }

    /// Serializes the whole document as a plain nested JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // FieldNode's Serialize impl cannot fail for JSON output
        serde_json::to_value(&self.root).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn sample_document() -> ProtocolDocument {
        let mut intervention = IndexMap::new();
        intervention.insert(
            "dosage".to_string(),
            FieldNode::new(FieldValue::Scalar(Some(ScalarValue::Text(
                "10 mg".to_string(),
            )))),
        );

        let mut arm = IndexMap::new();
        arm.insert(
            "name".to_string(),
            FieldNode::new(FieldValue::Scalar(None)),
        );
        arm.insert(
            "interventions".to_string(),
            FieldNode::new(FieldValue::Collection(vec![FieldNode::new(
                FieldValue::Record(intervention),
            )])),
        );

        let mut root = IndexMap::new();
        root.insert(
            "arms".to_string(),
            FieldNode::new(FieldValue::Collection(vec![FieldNode::new(
                FieldValue::Record(arm),
            )])),
        );

        ProtocolDocument::new(FieldNode::new(FieldValue::Record(root)))
    }

    #[test]
    fn test_get_node_nested_collections() {
        let doc = sample_document();
        let path: FieldPath = "arms[0].interventions[0].dosage".parse().unwrap();
        let node = doc.get_node(&path).unwrap();
        assert_eq!(node.as_scalar().unwrap().as_text(), Some("10 mg"));
    }

    #[test]
    fn test_get_out_of_bounds_index_is_none() {
        let doc = sample_document();
        let path: FieldPath = "arms[3].name".parse().unwrap();
        assert!(doc.get(&path).is_none());
    }

    #[test]
    fn test_get_unknown_field_is_none() {
        let doc = sample_document();
        let path: FieldPath = "cohorts[0].name".parse().unwrap();
        assert!(doc.get(&path).is_none());
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let doc = sample_document();
        let path: FieldPath = "arms[0].name.first".parse().unwrap();
        assert!(doc.get(&path).is_none());
    }

    #[test]
    fn test_unset_scalar_reads_as_none() {
        let doc = sample_document();
        let path: FieldPath = "arms[0].name".parse().unwrap();
        assert!(doc.get_node(&path).is_some());
        assert!(doc.get(&path).is_none());
    }

    #[test]
    fn test_get_node_mut_writes_through() {
        let mut doc = sample_document();
        let path: FieldPath = "arms[0].name".parse().unwrap();

        *doc.get_node_mut(&path).unwrap().value_mut() =
            FieldValue::Scalar(Some(ScalarValue::Text("Arm A".to_string())));

        assert_eq!(doc.get(&path).unwrap().as_text(), Some("Arm A"));
    }

    #[test]
    fn test_to_json_shape() {
        let doc = sample_document();
        let json = doc.to_json();
        assert_eq!(
            json["arms"][0]["interventions"][0]["dosage"],
            serde_json::json!("10 mg")
        );
        assert_eq!(json["arms"][0]["name"], serde_json::Value::Null);
    }
}
