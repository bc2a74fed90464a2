//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer producing a stream of spanned tokens. Dialects can
//! extend it with additional string literal styles via [`TokenizerSettings`].

mod token;
mod tokenizer;

pub use token::{Keyword, Span, StringStyle, Token, TokenKind};
pub use tokenizer::{Lexer, LiteralStyleSpec, TokenizerSettings};
