//! The form engine: path-addressed reads, writes, and collection mutations.
//!
//! `FormEngine` owns one `ProtocolDocument` for the lifetime of a wizard
//! session, alongside the schema it was instantiated from and the change log
//! that scopes re-renders. Every mutation runs to completion inside one
//! user-input event; there is no background work and no second writer.
//!
//! # Example
//!
//! ```
//! use studybuilder::engine::FormEngine;
//! use studybuilder::document::ScalarValue;
//! use studybuilder::schema::protocol_schema;
//!
//! let mut engine = FormEngine::new(protocol_schema());
//!
//! let title = "overview.title".parse().unwrap();
//! engine.set(&title, ScalarValue::Text("First-in-human PK study".into())).unwrap();
//! assert_eq!(engine.get(&title).unwrap().as_text(), Some("First-in-human PK study"));
//!
//! // Collections grow explicitly, never by writing past the end
//! let arms = "arms".parse().unwrap();
//! let new_index = engine.append(&arms).unwrap();
//! assert_eq!(new_index, 1);
//! ```

use crate::document::node::{FieldNode, FieldValue, ScalarValue};
use crate::document::tree::ProtocolDocument;
use crate::fieldpath::{FieldPath, PathSegment};
use crate::schema::FieldSchema;

use super::changes::{Change, ChangeKind, ChangeLog};
use super::error::EngineError;
use super::validation;

/// State engine for one protocol document.
pub struct FormEngine {
    schema: FieldSchema,
    document: ProtocolDocument,
    changes: ChangeLog,
}

impl FormEngine {
    /// Creates an engine with a fresh default document for the given schema.
    ///
    /// Each collection starts with one default element, matching the form
    /// sections the wizard renders on first visit.
    pub fn new(schema: FieldSchema) -> Self {
        let document = ProtocolDocument::new(schema.instantiate());
        Self {
            schema,
            document,
            changes: ChangeLog::new(),
        }
    }

    /// Returns the current document.
    pub fn document(&self) -> &ProtocolDocument {
        &self.document
    }

    /// Returns the schema this engine was built from.
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Reads the scalar at `path`.
    ///
    /// Fails softly: any unresolvable path, including an index for an
    /// element that was never created, reads as `None`.
    pub fn get(&self, path: &FieldPath) -> Option<&ScalarValue> {
        self.document.get(path)
    }

    /// Writes a scalar value at `path`.
    ///
    /// Intermediate record nodes are created from the schema if absent.
    /// Intermediate collection elements are never created implicitly:
    /// writing through a nonexistent index is an `IndexOutOfBounds` error,
    /// which keeps sparse collections impossible.
    pub fn set(&mut self, path: &FieldPath, value: ScalarValue) -> Result<(), EngineError> {
        let (node, _) = descend(self.document.root_mut(), &self.schema, path)?;

        match node.value_mut() {
            FieldValue::Scalar(slot) => {
                *slot = Some(value);
            }
            _ => {
                return Err(EngineError::NotAScalar {
                    path: path.to_string(),
                })
            }
        }

        self.changes.record(path.clone(), ChangeKind::ValueSet);
        Ok(())
    }

    /// Appends a new element to the collection at `collection_path`.
    ///
    /// The element is built from the collection's declared template, so it
    /// is structurally independent of every sibling: no appended element
    /// ever shares nested-collection identity with the element before it.
    ///
    /// Returns the index of the new element.
    pub fn append(&mut self, collection_path: &FieldPath) -> Result<usize, EngineError> {
        let (node, schema) = descend(self.document.root_mut(), &self.schema, collection_path)?;

        let element_schema = match schema.element() {
            Some(element) => element,
            None => {
                return Err(EngineError::NotACollection {
                    path: collection_path.to_string(),
                })
            }
        };

        let new_index = match node.value_mut() {
            FieldValue::Collection(elements) => {
                elements.push(element_schema.instantiate());
                elements.len() - 1
            }
            _ => {
                return Err(EngineError::NotACollection {
                    path: collection_path.to_string(),
                })
            }
        };

        self.changes
            .record(collection_path.clone(), ChangeKind::ElementAppended);
        Ok(new_index)
    }

    /// Removes the element at `index` from the collection at
    /// `collection_path`, deep-removing its entire subtree.
    ///
    /// Removing the sole remaining element is rejected with
    /// `LastElementRemoval` and the document's values are left unchanged.
    /// On success every element after `index` shifts down by one, so paths
    /// that addressed trailing siblings now address the shifted elements.
    pub fn remove_at(
        &mut self,
        collection_path: &FieldPath,
        index: usize,
    ) -> Result<(), EngineError> {
        let (node, _) = descend(self.document.root_mut(), &self.schema, collection_path)?;

        match node.value_mut() {
            FieldValue::Collection(elements) => {
                if elements.len() == 1 {
                    return Err(EngineError::LastElementRemoval {
                        path: collection_path.to_string(),
                    });
                }
                if index >= elements.len() {
                    return Err(EngineError::IndexOutOfBounds {
                        path: collection_path.to_string(),
                        index,
                        len: elements.len(),
                    });
                }
                // Dropping the node drops every nested subtree with it
                elements.remove(index);
            }
            _ => {
                return Err(EngineError::NotACollection {
                    path: collection_path.to_string(),
                })
            }
        }

        self.changes
            .record(collection_path.clone(), ChangeKind::ElementRemoved);
        Ok(())
    }

    /// Returns the ordered list of required fields that are still unfilled.
    pub fn missing_fields(&self) -> Vec<FieldPath> {
        validation::missing_fields(&self.schema, &self.document)
    }

    /// Returns true when the document satisfies every required-field flag.
    pub fn is_complete(&self) -> bool {
        validation::is_complete(&self.schema, &self.document)
    }

    /// Takes all changes recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        self.changes.drain()
    }

    /// Returns true if any undrained change falls inside the given subtree.
    pub fn has_changes_under(&self, subtree: &FieldPath) -> bool {
        self.changes.touches(subtree)
    }

    /// Discards the current document and starts a fresh one.
    pub fn reset(&mut self) {
        self.document = ProtocolDocument::new(self.schema.instantiate());
        self.changes = ChangeLog::new();
    }
}

/// Walks the document and schema in parallel down to `path`.
///
/// Record children missing from the document are materialized from the
/// schema on the way down. Collection indices are never materialized: an
/// index past the end of an existing collection is an error, since elements
/// are created explicitly through `FormEngine::append`.
fn descend<'a>(
    root: &'a mut FieldNode,
    root_schema: &'a FieldSchema,
    path: &FieldPath,
) -> Result<(&'a mut FieldNode, &'a FieldSchema), EngineError> {
    let mut node = root;
    let mut schema = root_schema;

    for segment in path.segments() {
        match segment {
            PathSegment::Field(name) => {
                let child_schema = match schema.child(name) {
                    Some(child) => child,
                    None => {
                        return Err(EngineError::UnknownField {
                            path: path.to_string(),
                        })
                    }
                };
                node = match node.value_mut() {
                    FieldValue::Record(fields) => fields
                        .entry(name.clone())
                        .or_insert_with(|| child_schema.instantiate()),
                    _ => {
                        return Err(EngineError::UnknownField {
                            path: path.to_string(),
                        })
                    }
                };
                schema = child_schema;
            }
            PathSegment::Index(idx) => {
                let element_schema = match schema.element() {
                    Some(element) => element,
                    None => {
                        return Err(EngineError::NotACollection {
                            path: path.to_string(),
                        })
                    }
                };
                node = match node.value_mut() {
                    FieldValue::Collection(elements) => {
                        let len = elements.len();
                        match elements.get_mut(*idx) {
                            Some(element) => element,
                            None => {
                                return Err(EngineError::IndexOutOfBounds {
                                    path: path.to_string(),
                                    index: *idx,
                                    len,
                                })
                            }
                        }
                    }
                    _ => {
                        return Err(EngineError::NotACollection {
                            path: path.to_string(),
                        })
                    }
                };
                schema = element_schema;
            }
        }
    }

    Ok((node, schema))
}
