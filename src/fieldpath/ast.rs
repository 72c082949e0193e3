//! Field path representation.
//!
//! A field path addresses exactly one node in a protocol document by mixing
//! named-field and indexed-collection segments, e.g.
//! `arms[2].interventions[0].dosage`.

use std::fmt;
use std::str::FromStr;

use super::error::PathParseError;
use super::parser::Parser;

/// A segment in a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named child of a record (`.dosage`)
    Field(String),
    /// Indexed element of a collection (`[2]`)
    Index(usize),
}

/// A complete field path.
///
/// Paths are deterministic: the same path always addresses the same node
/// until a mutation removes that node. They render back to the exact
/// dotted/bracketed text they were parsed from.
///
/// # Example
///
/// ```
/// use studybuilder::fieldpath::FieldPath;
///
/// let path: FieldPath = "arms[2].interventions[0].dosage".parse().unwrap();
/// assert_eq!(path.segments().len(), 5);
/// assert_eq!(path.to_string(), "arms[2].interventions[0].dosage");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates a field path from pre-built segments.
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// The empty path, addressing the document root.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses a path expression like `visits[1].procedures[0].name`.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        Parser::parse(input)
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns true if this path has no segments (the document root).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with a named-field segment appended.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.to_string()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn index(&self, idx: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(idx));
        Self { segments }
    }

    /// Returns the path of this node's parent, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns true if `prefix` addresses this node or one of its ancestors.
    ///
    /// This is the scoping test a view uses to decide whether a change under
    /// some subtree requires re-rendering it.
    ///
    /// # Example
    ///
    /// ```
    /// use studybuilder::fieldpath::FieldPath;
    ///
    /// let leaf: FieldPath = "arms[0].interventions[1].dosage".parse().unwrap();
    /// let subtree: FieldPath = "arms[0]".parse().unwrap();
    /// let sibling: FieldPath = "arms[1]".parse().unwrap();
    ///
    /// assert!(leaf.starts_with(&subtree));
    /// assert!(!leaf.starts_with(&sibling));
    /// ```
    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        if prefix.segments.len() > self.segments.len() {
            return false;
        }
        self.segments[..prefix.segments.len()] == prefix.segments[..]
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}
