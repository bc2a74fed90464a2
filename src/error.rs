//! Crate-level error type.

use thiserror::Error;

/// Any error the pipeline can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// The input failed to parse.
    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),

    /// The AST failed to render.
    #[error(transparent)]
    Render(#[from] crate::generator::RenderError),
}

/// Result alias used by the top-level API.
pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;
    use crate::parser::ParseError;

    #[test]
    fn test_parse_error_converts() {
        let err: Error = ParseError::new("boom", Span::new(0, 1)).into();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.to_string(), "boom at position 0..1");
    }
}
