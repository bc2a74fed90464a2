//! SQL parsing and cross-dialect generation.
//!
//! The pipeline is lexer → parser → AST → generator, with a [`Dialect`]
//! threaded through both ends. A dialect contributes tokenizer settings
//! (extra literal styles), parse routines for function calls, and a
//! transform table that controls how each expression kind renders. New
//! dialects derive from an existing one and override only what differs; see
//! [`Dialect::derive`].
//!
//! # Example
//!
//! ```
//! use sqlport::Dialect;
//!
//! let out = sqlport::transpile(
//!     "SELECT GROUP_CONCAT(name ORDER BY name SEPARATOR '|') FROM users",
//!     &Dialect::generic(),
//!     &Dialect::trino(),
//! )
//! .unwrap();
//! assert_eq!(
//!     out,
//!     vec!["SELECT LISTAGG(name, '|') WITHIN GROUP (ORDER BY name) FROM users"]
//! );
//! ```

pub mod ast;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;

pub use dialect::{Dialect, DialectBuilder, FunctionParser, OptionGrammar, RenderFn};
pub use error::{Error, Result};
pub use generator::{Generator, RenderError};
pub use parser::{ParseError, Parser};

use ast::Statement;

/// Parses SQL into statements under the given dialect.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the input is not valid SQL for the dialect.
pub fn parse(sql: &str, dialect: &Dialect) -> Result<Vec<Statement>> {
    tracing::debug!(dialect = dialect.name(), "parsing input");
    let statements = Parser::new(sql, dialect).parse_statements()?;
    Ok(statements)
}

/// Renders statements as SQL under the given dialect.
///
/// # Errors
///
/// Returns [`Error::Render`] if a statement contains an expression kind the
/// dialect has no renderer for.
pub fn generate(statements: &[Statement], dialect: &Dialect) -> Result<Vec<String>> {
    tracing::debug!(
        dialect = dialect.name(),
        count = statements.len(),
        "rendering statements"
    );
    let generator = Generator::new(dialect);
    let mut out = Vec::with_capacity(statements.len());
    for statement in statements {
        out.push(generator.statement(statement)?);
    }
    Ok(out)
}

/// Parses SQL under `read` and renders it under `write`.
///
/// # Errors
///
/// Propagates parse and render errors.
pub fn transpile(sql: &str, read: &Dialect, write: &Dialect) -> Result<Vec<String>> {
    let statements = parse(sql, read)?;
    generate(&statements, write)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_generate() {
        let dialect = Dialect::generic();
        let statements = parse("SELECT 1; SELECT 2", &dialect).unwrap();
        let sql = generate(&statements, &dialect).unwrap();
        assert_eq!(sql, vec!["SELECT 1", "SELECT 2"]);
    }

    #[test]
    fn test_transpile_same_dialect_is_identity_on_canonical_sql() {
        let dialect = Dialect::generic();
        let sql = "SELECT id, name FROM users WHERE id = 1";
        assert_eq!(transpile(sql, &dialect, &dialect).unwrap(), vec![sql]);
    }

    #[test]
    fn test_parse_error_surfaces() {
        let dialect = Dialect::generic();
        assert!(matches!(
            parse("SELECT FROM WHERE", &dialect),
            Err(Error::Parse(_))
        ));
    }
}
