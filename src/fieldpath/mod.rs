//! Field path parsing and representation.
//!
//! A field path addresses a single node in the protocol document tree by
//! mixing named-field segments with indexed-collection segments.
//!
//! # Supported Syntax
//!
//! - `name` - Named field of a record
//! - `.name` - Nested named field
//! - `[index]` - Collection element (non-negative, addresses one element)
//!
//! # Examples
//!
//! ```text
//! overview.title                      - scalar in a top-level record
//! arms[2].interventions[0].dosage     - scalar two collections deep
//! visits[1].procedures                - a nested collection itself
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{FieldPath, PathSegment};
pub use error::PathParseError;
pub use parser::Parser;
