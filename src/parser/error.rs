//! Parser error types.

use crate::lexer::{Span, TokenKind};
use thiserror::Error;

/// A parse error.
///
/// Carries the offending position and, where known, the expected
/// alternatives, so callers can report what the grammar would have accepted.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at position {}..{}", .span.start, .span.end)]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Expected tokens (if applicable).
    pub expected: Option<String>,
    /// The actual token found.
    pub found: Option<TokenKind>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
        let expected_str: String = expected.into();
        Self {
            message: format!("Unexpected token: expected {expected_str}, found {found:?}"),
            span,
            expected: Some(expected_str),
            found: Some(found),
        }
    }

    /// Creates an error naming a set of expected clause alternatives.
    #[must_use]
    pub fn expected_one_of(alternatives: &[String], found: TokenKind, span: Span) -> Self {
        let expected_str = alternatives.join(", ");
        Self {
            message: format!("Expected one of: {expected_str}"),
            span,
            expected: Some(expected_str),
            found: Some(found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = ParseError::new("boom", Span::new(3, 7));
        assert_eq!(err.to_string(), "boom at position 3..7");
    }

    #[test]
    fn test_expected_one_of() {
        let err = ParseError::expected_one_of(
            &[String::from("WITH WRAPPER"), String::from("WITHOUT WRAPPER")],
            TokenKind::Comma,
            Span::new(0, 1),
        );
        assert!(err.message.contains("WITH WRAPPER"));
        assert!(err.message.contains("WITHOUT WRAPPER"));
        assert_eq!(err.found, Some(TokenKind::Comma));
    }
}
