//! Field path expression parser.

use super::ast::{FieldPath, PathSegment};
use super::error::PathParseError;

/// Parser for field path expressions.
///
/// The grammar is deliberately small: an identifier, followed by any number
/// of `.identifier` and `[index]` segments. Unlike a query language there are
/// no wildcards, slices, or negative indices; a path addresses exactly one
/// node.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    /// Creates a new parser for the given expression.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            position: 0,
        }
    }

    /// Parses the expression into a `FieldPath`.
    pub fn parse(input: &str) -> Result<FieldPath, PathParseError> {
        let mut parser = Parser::new(input);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<FieldPath, PathParseError> {
        let mut segments = Vec::new();

        self.skip_whitespace();

        // A path always starts with a named field
        let name = self.parse_identifier()?;
        segments.push(PathSegment::Field(name));

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.next();
                    let name = self.parse_identifier()?;
                    segments.push(PathSegment::Field(name));
                }
                Some('[') => {
                    segments.push(self.parse_index()?);
                }
                Some(ch) => {
                    return Err(PathParseError::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'.' or '['".to_string(),
                    });
                }
                None => break,
            }
        }

        Ok(FieldPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), PathParseError> {
        self.skip_whitespace();
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(PathParseError::UnexpectedToken {
                position: pos,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(PathParseError::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a field name.
    fn parse_identifier(&mut self) -> Result<String, PathParseError> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(PathParseError::InvalidSyntax {
                message: "Expected field name".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses an index segment: `[0]`, `[12]`
    fn parse_index(&mut self) -> Result<PathSegment, PathParseError> {
        self.expect('[')?;
        self.skip_whitespace();

        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if digits.is_empty() {
            return Err(PathParseError::InvalidSyntax {
                message: "Expected collection index".to_string(),
            });
        }

        let index = digits
            .parse::<usize>()
            .map_err(|_| PathParseError::InvalidSyntax {
                message: format!("Invalid index: {}", digits),
            })?;

        self.expect(']')?;
        Ok(PathSegment::Index(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_field() {
        let path = Parser::parse("title").unwrap();
        assert_eq!(path.segments(), &[PathSegment::Field("title".to_string())]);
    }

    #[test]
    fn test_parse_nested_fields() {
        let path = Parser::parse("endpoints.primary.name").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("endpoints".to_string()),
                PathSegment::Field("primary".to_string()),
                PathSegment::Field("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_collection_index() {
        let path = Parser::parse("arms[2]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("arms".to_string()),
                PathSegment::Index(2),
            ]
        );
    }

    #[test]
    fn test_parse_nested_collections() {
        let path = Parser::parse("arms[2].interventions[0].dosage").unwrap();
        assert_eq!(path.segments().len(), 5);
        assert_eq!(path.segments()[1], PathSegment::Index(2));
        assert_eq!(path.segments()[3], PathSegment::Index(0));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(Parser::parse("").is_err());
    }

    #[test]
    fn test_parse_leading_dot_fails() {
        assert!(Parser::parse(".arms").is_err());
    }

    #[test]
    fn test_parse_negative_index_fails() {
        assert!(Parser::parse("arms[-1]").is_err());
    }

    #[test]
    fn test_parse_unclosed_bracket_fails() {
        let result = Parser::parse("arms[2");
        assert!(matches!(
            result,
            Err(PathParseError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn test_parse_trailing_garbage_fails() {
        assert!(Parser::parse("arms[0]!").is_err());
    }

    #[test]
    fn test_parse_whitespace_handling() {
        let path = Parser::parse("arms [ 0 ] . name").unwrap();
        assert_eq!(path.to_string(), "arms[0].name");
    }

    #[test]
    fn test_parse_underscored_names() {
        let path = Parser::parse("overview.estimated_enrollment").unwrap();
        assert_eq!(path.segments().len(), 2);
    }
}
