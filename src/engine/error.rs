//! Error types for form engine mutations and submission.

use std::fmt;

use crate::fieldpath::FieldPath;

/// Errors returned by the engine's mutation operations.
///
/// The addressing variants are programming errors in the wizard shell (the
/// UI should never construct a path for a nonexistent element), so they are
/// surfaced to internal callers and not shown to the user.
/// `LastElementRemoval` is the one expected rejection: the UI hides the
/// remove control on a collection's only element, and the engine declines
/// the mutation if asked anyway, leaving the document unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Path names a field the schema does not declare.
    UnknownField { path: String },
    /// Path indexes past the end of an existing collection.
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },
    /// A collection operation was addressed at a non-collection node.
    NotACollection { path: String },
    /// A scalar write was addressed at a record or collection node.
    NotAScalar { path: String },
    /// Removal was requested for a collection's sole remaining element.
    LastElementRemoval { path: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownField { path } => {
                write!(f, "Path '{}' names a field not in the schema", path)
            }
            EngineError::IndexOutOfBounds { path, index, len } => write!(
                f,
                "Index {} out of bounds at '{}' (collection has {} elements)",
                index, path, len
            ),
            EngineError::NotACollection { path } => {
                write!(f, "'{}' is not a collection", path)
            }
            EngineError::NotAScalar { path } => {
                write!(f, "'{}' is not a scalar field", path)
            }
            EngineError::LastElementRemoval { path } => {
                write!(f, "Cannot remove the last element of '{}'", path)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Submission was blocked by the completeness gate.
///
/// Carries the ordered list of required field paths that are still unfilled,
/// for the view layer to translate into human-readable labels. Always
/// recoverable: the user returns to the relevant tab and fills the fields in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteSubmission {
    /// Missing required fields, in schema declaration order.
    pub missing: Vec<FieldPath>,
}

impl fmt::Display for IncompleteSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Submission blocked; {} required field", self.missing.len())?;
        if self.missing.len() != 1 {
            write!(f, "s")?;
        }
        write!(f, " missing: ")?;
        for (i, path) in self.missing.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for IncompleteSubmission {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::IndexOutOfBounds {
            path: "arms".to_string(),
            index: 5,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "Index 5 out of bounds at 'arms' (collection has 2 elements)"
        );
    }

    #[test]
    fn test_incomplete_submission_display_lists_paths() {
        let err = IncompleteSubmission {
            missing: vec![
                "overview.title".parse().unwrap(),
                "arms[0].name".parse().unwrap(),
            ],
        };
        let text = err.to_string();
        assert!(text.contains("2 required fields missing"));
        assert!(text.contains("overview.title"));
        assert!(text.contains("arms[0].name"));
    }
}
