//! Error types for field path parsing.

use std::fmt;

/// Errors that can occur while parsing a field path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Unexpected character at a specific position.
    UnexpectedToken {
        position: usize,
        found: String,
        expected: String,
    },
    /// Unexpected end of input.
    UnexpectedEnd { expected: String },
    /// Invalid syntax with description.
    InvalidSyntax { message: String },
}

impl fmt::Display for PathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathParseError::UnexpectedToken {
                position,
                found,
                expected,
            } => write!(
                f,
                "Unexpected token '{}' at position {}, expected {}",
                found, position, expected
            ),
            PathParseError::UnexpectedEnd { expected } => {
                write!(f, "Unexpected end of input, expected {}", expected)
            }
            PathParseError::InvalidSyntax { message } => {
                write!(f, "Invalid field path syntax: {}", message)
            }
        }
    }
}

impl std::error::Error for PathParseError {}
