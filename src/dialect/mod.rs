//! SQL dialects.
//!
//! A [`Dialect`] bundles the three extension points of the pipeline:
//! tokenizer settings (extra literal styles), a registry of function parse
//! routines consulted by the parser at every call position, and a transform
//! dispatch table mapping expression kinds to render functions. Dialects are
//! plain data over function pointers, so a derived dialect is built by
//! cloning a base and overriding entries; see [`Dialect::derive`].

mod generic;
mod trino;

pub use trino::JSON_QUERY_OPTIONS;

use std::collections::HashMap;

use crate::ast::{Expr, ExprKind};
use crate::generator::{Generator, RenderError};
use crate::lexer::{LiteralStyleSpec, TokenizerSettings};
use crate::parser::{ParseError, Parser};

/// A function parse routine.
///
/// Invoked by the parser after consuming `NAME (`. The routine consumes the
/// argument tokens and stops at (never consumes) the closing parenthesis,
/// which the parser then expects.
pub type FunctionParser = fn(&mut Parser<'_>) -> Result<Expr, ParseError>;

/// An expression render function.
pub type RenderFn = fn(&Generator<'_>, &Expr) -> Result<String, RenderError>;

/// A declarative grammar for multi-word qualifier clauses.
///
/// Each entry pairs a leading keyword with its candidate suffix sequences.
/// Candidates are tried in declaration order, so sequences sharing a leading
/// word must be declared longest first.
#[derive(Debug, Clone, Copy)]
pub struct OptionGrammar {
    entries: &'static [(&'static str, &'static [&'static [&'static str]])],
}

impl OptionGrammar {
    /// Creates a grammar from static entries.
    #[must_use]
    pub const fn new(
        entries: &'static [(&'static str, &'static [&'static [&'static str]])],
    ) -> Self {
        Self { entries }
    }

    /// Returns the grammar entries.
    #[must_use]
    pub const fn entries(&self) -> &'static [(&'static str, &'static [&'static [&'static str]])] {
        self.entries
    }

    /// Returns every full clause the grammar accepts, for error messages.
    #[must_use]
    pub fn alternatives(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (prefix, candidates) in self.entries {
            for candidate in *candidates {
                out.push(format!("{prefix} {}", candidate.join(" ")));
            }
        }
        out
    }
}

/// A SQL dialect: tokenizer settings, function parse routines, and the
/// expression transform table.
#[derive(Clone)]
pub struct Dialect {
    name: String,
    tokenizer: TokenizerSettings,
    functions: HashMap<String, FunctionParser>,
    transforms: HashMap<ExprKind, RenderFn>,
}

impl Dialect {
    /// Returns the dialect name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tokenizer settings for this dialect.
    #[must_use]
    pub const fn tokenizer(&self) -> &TokenizerSettings {
        &self.tokenizer
    }

    /// Looks up a function parse routine by name (case-insensitive).
    #[must_use]
    pub fn function_parser(&self, name: &str) -> Option<FunctionParser> {
        self.functions.get(&name.to_ascii_uppercase()).copied()
    }

    /// Looks up the render function for an expression kind.
    #[must_use]
    pub fn transform(&self, kind: ExprKind) -> Option<RenderFn> {
        self.transforms.get(&kind).copied()
    }

    /// Starts a derived dialect that inherits everything from `self`.
    ///
    /// Entries registered on the builder shadow inherited ones.
    #[must_use]
    pub fn derive(&self, name: impl Into<String>) -> DialectBuilder {
        DialectBuilder {
            name: name.into(),
            tokenizer: self.tokenizer.clone(),
            functions: self.functions.clone(),
            transforms: self.transforms.clone(),
        }
    }

    /// Starts an empty dialect builder (no inherited entries).
    #[must_use]
    pub fn builder(name: impl Into<String>) -> DialectBuilder {
        DialectBuilder {
            name: name.into(),
            tokenizer: TokenizerSettings::new(),
            functions: HashMap::new(),
            transforms: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dialect")
            .field("name", &self.name)
            .field("functions", &self.functions.len())
            .field("transforms", &self.transforms.len())
            .finish()
    }
}

/// Builder for dialects; see [`Dialect::derive`].
pub struct DialectBuilder {
    name: String,
    tokenizer: TokenizerSettings,
    functions: HashMap<String, FunctionParser>,
    transforms: HashMap<ExprKind, RenderFn>,
}

impl DialectBuilder {
    /// Registers an extra string-literal style.
    ///
    /// Registering a style whose opening delimiter is already taken replaces
    /// the earlier registration.
    #[must_use]
    pub fn string_style(mut self, spec: LiteralStyleSpec) -> Self {
        self.tokenizer.register_string_style(spec);
        self
    }

    /// Registers a function parse routine under `name` (stored uppercased,
    /// so registrations shadow across casings).
    #[must_use]
    pub fn function(mut self, name: &str, parser: FunctionParser) -> Self {
        self.functions.insert(name.to_ascii_uppercase(), parser);
        self
    }

    /// Registers a render function for an expression kind, shadowing any
    /// inherited entry.
    #[must_use]
    pub fn transform(mut self, kind: ExprKind, render: RenderFn) -> Self {
        self.transforms.insert(kind, render);
        self
    }

    /// Finishes the dialect.
    #[must_use]
    pub fn build(self) -> Dialect {
        Dialect {
            name: self.name,
            tokenizer: self.tokenizer,
            functions: self.functions,
            transforms: self.transforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_grammar_alternatives() {
        static GRAMMAR: OptionGrammar = OptionGrammar::new(&[
            ("WITH", &[&["ARRAY", "WRAPPER"], &["WRAPPER"]]),
            ("WITHOUT", &[&["WRAPPER"]]),
        ]);
        assert_eq!(
            GRAMMAR.alternatives(),
            vec!["WITH ARRAY WRAPPER", "WITH WRAPPER", "WITHOUT WRAPPER"]
        );
    }

    #[test]
    fn test_function_lookup_is_case_insensitive() {
        fn routine(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
            parser.parse_bitwise()
        }
        let dialect = Dialect::builder("test").function("my_func", routine).build();
        assert!(dialect.function_parser("MY_FUNC").is_some());
        assert!(dialect.function_parser("my_func").is_some());
        assert!(dialect.function_parser("other").is_none());
    }

    #[test]
    fn test_registration_shadows_across_casings() {
        fn first(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
            parser.parse_bitwise()
        }
        fn second(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
            let expr = parser.parse_bitwise()?;
            Ok(Expr::Paren(Box::new(expr)))
        }
        let dialect = Dialect::builder("test")
            .function("json_query", first)
            .function("JSON_QUERY", second)
            .build();
        let registered = dialect.function_parser("Json_Query").unwrap();
        assert!(registered == second as FunctionParser);
    }

    #[test]
    fn test_derive_inherits_and_overrides() {
        let base = Dialect::generic();
        let derived = base.derive("derived").build();
        assert_eq!(derived.name(), "derived");
        // Inherited registry and transform table are intact.
        assert!(derived.function_parser("GROUP_CONCAT").is_some());
        assert!(derived.transform(ExprKind::Literal).is_some());
    }

    #[test]
    fn test_dialect_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dialect>();
    }
}
