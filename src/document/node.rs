//! Protocol document node representation with metadata tracking.
//!
//! This module provides the core data structures for representing a protocol
//! document in studybuilder. Every value in the form tree is wrapped in a
//! `FieldNode` that tracks whether it has been touched since the wizard
//! opened, which lets a view re-render only the subtrees that changed.
//!
//! # Example
//!
//! ```
//! use studybuilder::document::node::{FieldNode, FieldValue, ScalarValue};
//! use indexmap::IndexMap;
//!
//! // A scalar leaf starts unset
//! let mut node = FieldNode::new(FieldValue::Scalar(None));
//! assert!(node.is_modified()); // New nodes are marked as modified
//!
//! // Fill it in
//! *node.value_mut() = FieldValue::Scalar(Some(ScalarValue::Text("Arm A".to_string())));
//!
//! // Records group named fields
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), node);
//! let record = FieldNode::new(FieldValue::Record(fields));
//! assert!(record.value().is_record());
//! ```

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A numeric field value (integer or float).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldNumber::Integer(i) => write!(f, "{}", i),
            FieldNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl FieldNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldNumber::Integer(i) => *i as f64,
            FieldNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, FieldNumber::Integer(_))
    }
}

/// A filled-in scalar leaf value.
///
/// Dates and choice selections are carried as their string form; the schema
/// records which kind a leaf expects, and the form controls constrain input.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Free text
    Text(String),
    /// A number (integer or float)
    Number(FieldNumber),
    /// An ISO-8601 calendar date, e.g. "2026-03-01"
    Date(String),
    /// One option from the schema's declared choice list
    Choice(String),
    /// A yes/no toggle
    Flag(bool),
}

impl ScalarValue {
    /// Returns true if this value is effectively unfilled.
    ///
    /// Blank or whitespace-only text counts as unfilled so that clearing a
    /// required text field puts it back on the missing-fields list.
    pub fn is_blank(&self) -> bool {
        match self {
            ScalarValue::Text(s) | ScalarValue::Date(s) | ScalarValue::Choice(s) => {
                s.trim().is_empty()
            }
            ScalarValue::Number(_) | ScalarValue::Flag(_) => false,
        }
    }

    /// Returns the text content, if this is a text-like value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ScalarValue::Text(s) | ScalarValue::Date(s) | ScalarValue::Choice(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Text(s) | ScalarValue::Date(s) | ScalarValue::Choice(s) => {
                write!(f, "{}", s)
            }
            ScalarValue::Number(n) => write!(f, "{}", n),
            ScalarValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

/// A node value without metadata.
///
/// The form tree has three node kinds: scalar leaves (possibly unset),
/// fixed-shape records, and ordered collections of homogeneous records.
/// Records and collections contain `FieldNode` instances so metadata is
/// tracked throughout the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A scalar leaf; `None` means the user has not filled it in
    Scalar(Option<ScalarValue>),
    /// A fixed-shape group of named fields
    Record(IndexMap<String, FieldNode>),
    /// An ordered sequence of homogeneous elements
    Collection(Vec<FieldNode>),
}

impl FieldValue {
    /// Returns true if this value is a record.
    pub fn is_record(&self) -> bool {
        matches!(self, FieldValue::Record(_))
    }

    /// Returns true if this value is a collection.
    pub fn is_collection(&self) -> bool {
        matches!(self, FieldValue::Collection(_))
    }

    /// Returns true if this value is a scalar leaf.
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldValue::Scalar(_))
    }
}

/// Metadata associated with a form tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMetadata {
    /// Whether this node has been touched since the document was opened
    pub modified: bool,
}

/// A form tree value wrapped with metadata.
///
/// `FieldNode` is the primary type used throughout studybuilder to represent
/// form state. It wraps a `FieldValue` with `NodeMetadata` so that a view can
/// ask whether a subtree has been touched without diffing values.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub(crate) value: FieldValue,
    pub(crate) metadata: NodeMetadata,
}

impl FieldNode {
    /// Creates a new `FieldNode` with the given value.
    ///
    /// The node is marked as modified by default since it's newly created.
    ///
    /// # Example
    ///
    /// ```
    /// use studybuilder::document::node::{FieldNode, FieldValue};
    ///
    /// let node = FieldNode::new(FieldValue::Scalar(None));
    /// assert!(node.is_modified());
    /// ```
    pub fn new(value: FieldValue) -> Self {
        Self {
            value,
            metadata: NodeMetadata { modified: true },
        }
    }

    /// Creates a node marked as pristine, for freshly instantiated documents.
    pub(crate) fn pristine(value: FieldValue) -> Self {
        Self {
            value,
            metadata: NodeMetadata { modified: false },
        }
    }

    /// Returns an immutable reference to the node's value.
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Returns a mutable reference to the node's value.
    ///
    /// Calling this method marks the node as modified, even if the value is
    /// not actually changed.
    ///
    /// # Example
    ///
    /// ```
    /// use studybuilder::document::node::{FieldNode, FieldValue, ScalarValue};
    ///
    /// let mut node = FieldNode::new(FieldValue::Scalar(None));
    /// *node.value_mut() = FieldValue::Scalar(Some(ScalarValue::Flag(true)));
    /// assert!(node.is_modified());
    /// ```
    pub fn value_mut(&mut self) -> &mut FieldValue {
        self.metadata.modified = true;
        &mut self.value
    }

    /// Returns whether this node has been touched.
    pub fn is_modified(&self) -> bool {
        self.metadata.modified
    }

    /// Returns the scalar value of this node, if it is a filled-in scalar.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match &self.value {
            FieldValue::Scalar(v) => v.as_ref(),
            _ => None,
        }
    }
}

impl Serialize for FieldNode {
    /// Serializes the node as the plain nested structure the submission
    /// collaborator expects: records become maps in declaration order,
    /// collections become arrays, unset scalars become null.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.value {
            FieldValue::Scalar(None) => serializer.serialize_none(),
            FieldValue::Scalar(Some(ScalarValue::Text(s)))
            | FieldValue::Scalar(Some(ScalarValue::Date(s)))
            | FieldValue::Scalar(Some(ScalarValue::Choice(s))) => serializer.serialize_str(s),
            FieldValue::Scalar(Some(ScalarValue::Number(FieldNumber::Integer(i)))) => {
                serializer.serialize_i64(*i)
            }
            FieldValue::Scalar(Some(ScalarValue::Number(FieldNumber::Float(f)))) => {
                serializer.serialize_f64(*f)
            }
            FieldValue::Scalar(Some(ScalarValue::Flag(b))) => serializer.serialize_bool(*b),
            FieldValue::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, child) in fields {
                    map.serialize_entry(name, child)?;
                }
                map.end()
            }
            FieldValue::Collection(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}
