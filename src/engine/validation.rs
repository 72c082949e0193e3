//! The completeness gate.
//!
//! Walks the schema and the document in parallel and reports every required
//! scalar that is still unfilled. The walk follows the document's actual
//! population: a collection with five elements is checked five times,
//! however many the schema's default was. Results come back in schema
//! declaration order, which is also wizard tab order, so the missing-fields
//! list reads top to bottom the way the form does.

use crate::document::node::{FieldNode, FieldValue};
use crate::document::tree::ProtocolDocument;
use crate::fieldpath::FieldPath;
use crate::schema::FieldSchema;

/// Returns the paths of all required scalars that are unset or blank.
pub fn missing_fields(schema: &FieldSchema, document: &ProtocolDocument) -> Vec<FieldPath> {
    let mut missing = Vec::new();
    walk(schema, Some(document.root()), &FieldPath::root(), &mut missing);
    missing
}

/// Returns true when every required scalar in the document is filled.
pub fn is_complete(schema: &FieldSchema, document: &ProtocolDocument) -> bool {
    missing_fields(schema, document).is_empty()
}

fn walk(
    schema: &FieldSchema,
    node: Option<&FieldNode>,
    path: &FieldPath,
    missing: &mut Vec<FieldPath>,
) {
    match schema {
        FieldSchema::Scalar { required, .. } => {
            if !*required {
                return;
            }
            let filled = node
                .and_then(|n| n.as_scalar())
                .map(|v| !v.is_blank())
                .unwrap_or(false);
            if !filled {
                missing.push(path.clone());
            }
        }
        FieldSchema::Record(fields) => {
            let children = match node.map(FieldNode::value) {
                Some(FieldValue::Record(children)) => Some(children),
                _ => None,
            };
            for (name, child_schema) in fields {
                let child = children.and_then(|c| c.get(name));
                walk(child_schema, child, &path.child(name), missing);
            }
        }
        FieldSchema::Collection(element) => {
            // Only elements that actually exist are checked; a record that
            // was never materialized contributes no collection elements.
            if let Some(FieldValue::Collection(elements)) = node.map(FieldNode::value) {
                for (idx, child) in elements.iter().enumerate() {
                    walk(element, Some(child), &path.index(idx), missing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::node::ScalarValue;

    fn small_schema() -> FieldSchema {
        FieldSchema::record(vec![
            ("title", FieldSchema::required_text()),
            ("notes", FieldSchema::text()),
            (
                "arms",
                FieldSchema::collection(FieldSchema::record(vec![(
                    "name",
                    FieldSchema::required_text(),
                )])),
            ),
        ])
    }

    fn set(document: &mut ProtocolDocument, path: &str, text: &str) {
        let path: FieldPath = path.parse().unwrap();
        *document.get_node_mut(&path).unwrap().value_mut() =
            FieldValue::Scalar(Some(ScalarValue::Text(text.to_string())));
    }

    #[test]
    fn test_fresh_document_reports_required_fields_in_order() {
        let schema = small_schema();
        let document = ProtocolDocument::new(schema.instantiate());

        let missing: Vec<String> = missing_fields(&schema, &document)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(missing, vec!["title", "arms[0].name"]);
        assert!(!is_complete(&schema, &document));
    }

    #[test]
    fn test_filling_a_field_removes_exactly_its_path() {
        let schema = small_schema();
        let mut document = ProtocolDocument::new(schema.instantiate());

        set(&mut document, "title", "Dose Escalation Study");

        let missing: Vec<String> = missing_fields(&schema, &document)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(missing, vec!["arms[0].name"]);
    }

    #[test]
    fn test_blank_text_still_missing() {
        let schema = small_schema();
        let mut document = ProtocolDocument::new(schema.instantiate());

        set(&mut document, "title", "   ");

        let missing = missing_fields(&schema, &document);
        assert!(missing.iter().any(|p| p.to_string() == "title"));
    }

    #[test]
    fn test_complete_document() {
        let schema = small_schema();
        let mut document = ProtocolDocument::new(schema.instantiate());

        set(&mut document, "title", "Study");
        set(&mut document, "arms[0].name", "Arm A");

        assert!(is_complete(&schema, &document));
        assert!(missing_fields(&schema, &document).is_empty());
    }

    #[test]
    fn test_checks_scale_with_population() {
        let schema = small_schema();
        let mut document = ProtocolDocument::new(schema.instantiate());

        // Grow the arms collection by hand to three elements
        let arms_path: FieldPath = "arms".parse().unwrap();
        let template = schema.lookup(&"arms[0]".parse().unwrap()).unwrap();
        if let FieldValue::Collection(elements) =
            document.get_node_mut(&arms_path).unwrap().value_mut()
        {
            elements.push(template.instantiate());
            elements.push(template.instantiate());
        }

        let missing: Vec<String> = missing_fields(&schema, &document)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            missing,
            vec!["title", "arms[0].name", "arms[1].name", "arms[2].name"]
        );
    }
}
