//! SQL parser.
//!
//! Turns a token stream into AST statements. Dialects hook into the parser
//! two ways: the tokenizer settings used to lex the input, and a registry of
//! parse routines consulted for every function-call position. The cursor
//! primitives and clause matchers on [`Parser`] are public so those routines
//! can be written outside this module.

mod error;
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::Parser;
