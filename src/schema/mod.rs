//! Schema definitions for the protocol form tree.
//!
//! A `FieldSchema` declares the shape of the document: which named fields a
//! record carries, what element template a collection repeats, and which
//! scalar leaves are required for final submission. The schema is fixed at
//! definition time; the document instantiated from it grows and shrinks as
//! the user adds and removes collection elements.
//!
//! # Example
//!
//! ```
//! use studybuilder::schema::{FieldSchema, ScalarKind};
//! use studybuilder::document::FieldValue;
//!
//! let arm = FieldSchema::record(vec![
//!     ("name", FieldSchema::required_text()),
//!     ("description", FieldSchema::text()),
//! ]);
//! let schema = FieldSchema::record(vec![("arms", FieldSchema::collection(arm))]);
//!
//! // A fresh document has one default element per collection
//! let root = schema.instantiate();
//! match root.value() {
//!     FieldValue::Record(fields) => match fields["arms"].value() {
//!         FieldValue::Collection(elements) => assert_eq!(elements.len(), 1),
//!         _ => unreachable!(),
//!     },
//!     _ => unreachable!(),
//! }
//! ```

pub mod protocol;

use indexmap::IndexMap;

use crate::document::node::{FieldNode, FieldValue};
use crate::fieldpath::{FieldPath, PathSegment};

pub use protocol::protocol_schema;

/// The kind of value a scalar leaf holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarKind {
    /// Free text
    Text,
    /// Integer or float
    Number,
    /// ISO-8601 calendar date
    Date,
    /// One of a fixed set of options
    Choice(Vec<String>),
    /// Yes/no toggle
    Flag,
}

/// Declared shape of one node in the form tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    /// A scalar leaf with its kind and required flag
    Scalar { kind: ScalarKind, required: bool },
    /// A fixed-shape group of named fields, in declaration order
    Record(IndexMap<String, FieldSchema>),
    /// An ordered sequence of homogeneous elements built from one template
    Collection(Box<FieldSchema>),
}

impl FieldSchema {
    /// An optional free-text scalar.
    pub fn text() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Text,
            required: false,
        }
    }

    /// A free-text scalar that must be filled before submission.
    pub fn required_text() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Text,
            required: true,
        }
    }

    /// An optional numeric scalar.
    pub fn number() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Number,
            required: false,
        }
    }

    /// A numeric scalar that must be filled before submission.
    pub fn required_number() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Number,
            required: true,
        }
    }

    /// An optional date scalar.
    pub fn date() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Date,
            required: false,
        }
    }

    /// An optional choice scalar with the given options.
    pub fn choice(options: &[&str]) -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Choice(options.iter().map(|s| s.to_string()).collect()),
            required: false,
        }
    }

    /// A choice scalar that must be filled before submission.
    pub fn required_choice(options: &[&str]) -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Choice(options.iter().map(|s| s.to_string()).collect()),
            required: true,
        }
    }

    /// An optional yes/no scalar.
    pub fn flag() -> Self {
        FieldSchema::Scalar {
            kind: ScalarKind::Flag,
            required: false,
        }
    }

    /// A record with the given named fields, in order.
    pub fn record(fields: Vec<(&str, FieldSchema)>) -> Self {
        let mut map = IndexMap::new();
        for (name, schema) in fields {
            map.insert(name.to_string(), schema);
        }
        FieldSchema::Record(map)
    }

    /// A collection whose elements are built from `element`.
    pub fn collection(element: FieldSchema) -> Self {
        FieldSchema::Collection(Box::new(element))
    }

    /// Returns the schema of a record's named field.
    pub fn child(&self, name: &str) -> Option<&FieldSchema> {
        match self {
            FieldSchema::Record(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Returns the element template of a collection.
    pub fn element(&self) -> Option<&FieldSchema> {
        match self {
            FieldSchema::Collection(element) => Some(element),
            _ => None,
        }
    }

    /// Returns true for a required scalar leaf.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            FieldSchema::Scalar { required: true, .. }
        )
    }

    /// Returns the scalar kind of a leaf schema.
    pub fn kind(&self) -> Option<&ScalarKind> {
        match self {
            FieldSchema::Scalar { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Resolves the schema node a path addresses.
    ///
    /// Index segments resolve to the collection's element template whatever
    /// their value; the schema declares shape, not population.
    pub fn lookup(&self, path: &FieldPath) -> Option<&FieldSchema> {
        let mut current = self;
        for segment in path.segments() {
            current = match segment {
                PathSegment::Field(name) => current.child(name)?,
                PathSegment::Index(_) => current.element()?,
            };
        }
        Some(current)
    }

    /// Builds the default document node for this schema.
    ///
    /// Scalars start unset, records carry all their declared fields, and
    /// collections start with exactly one default element. Every node built
    /// here is a structurally independent copy; instantiating the same
    /// schema twice never shares nested state.
    pub fn instantiate(&self) -> FieldNode {
        match self {
            FieldSchema::Scalar { .. } => FieldNode::pristine(FieldValue::Scalar(None)),
            FieldSchema::Record(fields) => {
                let mut children = IndexMap::new();
                for (name, child) in fields {
                    children.insert(name.clone(), child.instantiate());
                }
                FieldNode::pristine(FieldValue::Record(children))
            }
            FieldSchema::Collection(element) => {
                FieldNode::pristine(FieldValue::Collection(vec![element.instantiate()]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::ScalarValue;

    fn arms_schema() -> FieldSchema {
        FieldSchema::record(vec![(
            "arms",
            FieldSchema::collection(FieldSchema::record(vec![
                ("name", FieldSchema::required_text()),
                (
                    "interventions",
                    FieldSchema::collection(FieldSchema::record(vec![
                        ("name", FieldSchema::required_text()),
                        ("dosage", FieldSchema::text()),
                    ])),
                ),
            ])),
        )])
    }

    #[test]
    fn test_instantiate_one_element_per_collection() {
        let root = arms_schema().instantiate();
        let FieldValue::Record(fields) = root.value() else {
            panic!("Expected record root");
        };
        let FieldValue::Collection(arms) = fields["arms"].value() else {
            panic!("Expected arms collection");
        };
        assert_eq!(arms.len(), 1);

        let FieldValue::Record(arm) = arms[0].value() else {
            panic!("Expected arm record");
        };
        let FieldValue::Collection(interventions) = arm["interventions"].value() else {
            panic!("Expected interventions collection");
        };
        assert_eq!(interventions.len(), 1);
    }

    #[test]
    fn test_instantiate_is_pristine() {
        let root = arms_schema().instantiate();
        assert!(!root.is_modified());
    }

    #[test]
    fn test_instantiated_elements_are_independent() {
        let schema = arms_schema();
        let element = schema.lookup(&"arms[0]".parse().unwrap()).unwrap();

        let mut first = element.instantiate();
        let second = element.instantiate();

        // Mutate the first element's nested intervention
        if let FieldValue::Record(fields) = first.value_mut() {
            if let FieldValue::Collection(elements) =
                fields.get_mut("interventions").unwrap().value_mut()
            {
                if let FieldValue::Record(intervention) = elements[0].value_mut() {
                    *intervention.get_mut("dosage").unwrap().value_mut() =
                        FieldValue::Scalar(Some(ScalarValue::Text("5 mg".to_string())));
                }
            }
        }

        // The second element is untouched
        let FieldValue::Record(fields) = second.value() else {
            panic!();
        };
        let FieldValue::Collection(elements) = fields["interventions"].value() else {
            panic!();
        };
        let FieldValue::Record(intervention) = elements[0].value() else {
            panic!();
        };
        assert!(intervention["dosage"].as_scalar().is_none());
    }

    #[test]
    fn test_lookup_through_indices() {
        let schema = arms_schema();
        let path: FieldPath = "arms[7].interventions[3].dosage".parse().unwrap();
        let leaf = schema.lookup(&path).unwrap();
        assert_eq!(leaf.kind(), Some(&ScalarKind::Text));
        assert!(!leaf.is_required());
    }

    #[test]
    fn test_lookup_unknown_field_is_none() {
        let schema = arms_schema();
        let path: FieldPath = "arms[0].route".parse().unwrap();
        assert!(schema.lookup(&path).is_none());
    }

    #[test]
    fn test_lookup_index_into_record_is_none() {
        let schema = arms_schema();
        let path: FieldPath = "arms[0].name[0]".parse().unwrap();
        assert!(schema.lookup(&path).is_none());
    }
}
