//! The Trino dialect.
//!
//! Extends the generic dialect with hex string literals, the `JSON_QUERY`
//! parse routine (wrapper options and quote directives), and renderers that
//! rewrite string aggregation to `LISTAGG ... WITHIN GROUP`.

use super::generic::{self, extraction_tail, overflow_text};
use super::{Dialect, OptionGrammar};
use crate::ast::{Expr, ExprKind, QuoteMode, QuotePolicy};
use crate::generator::{Generator, RenderError};
use crate::lexer::{LiteralStyleSpec, StringStyle, TokenKind};
use crate::parser::{ParseError, Parser};

/// Wrapper options accepted by `JSON_QUERY`.
///
/// Candidates that share a leading word are declared longest first, so
/// `CONDITIONAL ARRAY WRAPPER` wins over `CONDITIONAL WRAPPER` when both
/// would match.
pub static JSON_QUERY_OPTIONS: OptionGrammar = OptionGrammar::new(&[
    (
        "WITH",
        &[
            &["CONDITIONAL", "ARRAY", "WRAPPER"],
            &["CONDITIONAL", "WRAPPER"],
            &["UNCONDITIONAL", "ARRAY", "WRAPPER"],
            &["UNCONDITIONAL", "WRAPPER"],
            &["ARRAY", "WRAPPER"],
            &["WRAPPER"],
        ],
    ),
    ("WITHOUT", &[&["ARRAY", "WRAPPER"], &["WRAPPER"]]),
]);

impl Dialect {
    /// The Trino dialect.
    #[must_use]
    pub fn trino() -> Self {
        Self::generic()
            .derive("trino")
            .string_style(LiteralStyleSpec {
                open: "X'",
                close: "'",
                style: StringStyle::Hex,
            })
            .function("JSON_QUERY", parse_json_query)
            .transform(ExprKind::JsonExtract, render_json_extract)
            .transform(ExprKind::GroupConcat, render_group_concat)
            .build()
    }
}

/// Parses a trailing quote directive:
/// `KEEP QUOTES | OMIT QUOTES [ON SCALAR STRING]`.
///
/// The cursor is left untouched when neither mode is present.
fn parse_quote_policy(parser: &mut Parser<'_>) -> Option<QuotePolicy> {
    let mode = if parser.match_text_seq(&["KEEP", "QUOTES"]).is_some() {
        QuoteMode::Keep
    } else if parser.match_text_seq(&["OMIT", "QUOTES"]).is_some() {
        QuoteMode::Omit
    } else {
        return None;
    };

    let scalar = parser.match_text_seq(&["ON", "SCALAR", "STRING"]).is_some();

    Some(QuotePolicy { mode, scalar })
}

/// Parses `JSON_QUERY(<subject> [, <path>] [wrapper option] [quote directive])`.
fn parse_json_query(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let subject = parser.parse_bitwise()?;
    let path = if parser.eat(&TokenKind::Comma) {
        Some(Box::new(parser.parse_bitwise()?))
    } else {
        None
    };

    let option = parser.parse_option(&JSON_QUERY_OPTIONS, false)?;
    let quote = parse_quote_policy(parser);

    Ok(Expr::JsonExtract {
        subject: Box::new(subject),
        path,
        option,
        query: true,
        quote,
    })
}

/// Renders extractions: query-shaped calls become `JSON_QUERY(subject, path
/// option quote)` with the second argument dropped when every part is
/// absent; the plain shape keeps the generic output.
fn render_json_extract(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::JsonExtract {
        subject,
        path,
        option,
        query,
        quote,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };

    if !query {
        return generic::render_json_extract(g, e);
    }

    let mut parts = Vec::new();
    if let Some(path) = path {
        parts.push(g.expr(path)?);
    }
    let tail = extraction_tail(option.as_ref(), quote.as_ref());
    if !tail.is_empty() {
        parts.push(tail);
    }

    let subject_sql = g.expr(subject)?;
    if parts.is_empty() {
        Ok(format!("JSON_QUERY({subject_sql})"))
    } else {
        Ok(format!("JSON_QUERY({subject_sql}, {})", parts.join(" ")))
    }
}

/// Rewrites ordered string aggregation to
/// `LISTAGG(<arg>, <sep> [ON OVERFLOW ...]) WITHIN GROUP (ORDER BY ...)`.
///
/// The ordered argument is split out of its wrapper: the target renders once
/// inside `LISTAGG` and the ordering items render inside `WITHIN GROUP`.
/// Unordered aggregation keeps the generic output.
fn render_group_concat(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::GroupConcat {
        this,
        separator,
        on_overflow,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };

    let Expr::OrderWrap {
        target: Some(target),
        items,
    } = this.as_ref()
    else {
        return generic::render_group_concat(g, e);
    };

    let separator_sql = match separator {
        Some(separator) => g.expr(separator)?,
        None => String::from("','"),
    };

    let overflow_sql = match on_overflow {
        Some(clause) => format!(" ON OVERFLOW {}", overflow_text(g, clause)),
        None => String::new(),
    };

    Ok(format!(
        "LISTAGG({}, {separator_sql}{overflow_sql}) WITHIN GROUP (ORDER BY {})",
        g.expr(target)?,
        g.order_items(items)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;

    fn transpile(sql: &str) -> String {
        let dialect = Dialect::trino();
        let statement = Parser::new(sql, &dialect).parse_statement().unwrap();
        Generator::new(&dialect).statement(&statement).unwrap()
    }

    fn parse_expr(sql: &str) -> Expr {
        let dialect = Dialect::trino();
        let statement = Parser::new(sql, &dialect).parse_statement().unwrap();
        let Statement::Select(select) = statement else {
            panic!("Expected SELECT statement");
        };
        select.columns.into_iter().next().unwrap().expr
    }

    #[test]
    fn test_json_query_round_trip() {
        assert_eq!(
            transpile("SELECT JSON_QUERY(doc, '$.a' WITH ARRAY WRAPPER OMIT QUOTES) FROM t"),
            "SELECT JSON_QUERY(doc, '$.a' WITH ARRAY WRAPPER OMIT QUOTES) FROM t"
        );
    }

    #[test]
    fn test_json_query_minimal() {
        assert_eq!(transpile("SELECT JSON_QUERY(doc)"), "SELECT JSON_QUERY(doc)");
    }

    #[test]
    fn test_json_query_option_variants() {
        let expr = parse_expr("SELECT JSON_QUERY(doc, '$.a' WITH CONDITIONAL ARRAY WRAPPER)");
        let Expr::JsonExtract { option, .. } = expr else {
            panic!("Expected JsonExtract expression");
        };
        let option = option.unwrap();
        assert_eq!(option.keyword, "WITH");
        assert_eq!(option.suffix, "CONDITIONAL ARRAY WRAPPER");
    }

    #[test]
    fn test_json_query_quote_policy() {
        let expr = parse_expr("SELECT JSON_QUERY(doc, '$.a' KEEP QUOTES ON SCALAR STRING)");
        let Expr::JsonExtract { quote, .. } = expr else {
            panic!("Expected JsonExtract expression");
        };
        assert_eq!(
            quote,
            Some(QuotePolicy {
                mode: QuoteMode::Keep,
                scalar: true,
            })
        );
    }

    #[test]
    fn test_group_concat_becomes_listagg() {
        assert_eq!(
            transpile("SELECT GROUP_CONCAT(name ORDER BY name SEPARATOR '|') FROM t"),
            "SELECT LISTAGG(name, '|') WITHIN GROUP (ORDER BY name) FROM t"
        );
    }

    #[test]
    fn test_listagg_default_separator() {
        assert_eq!(
            transpile("SELECT GROUP_CONCAT(name ORDER BY name) FROM t"),
            "SELECT LISTAGG(name, ',') WITHIN GROUP (ORDER BY name) FROM t"
        );
    }

    #[test]
    fn test_listagg_with_overflow() {
        assert_eq!(
            transpile(
                "SELECT GROUP_CONCAT(v ORDER BY v DESC ON OVERFLOW TRUNCATE '...' SEPARATOR '|') FROM t"
            ),
            "SELECT LISTAGG(v, '|' ON OVERFLOW TRUNCATE '...') WITHIN GROUP (ORDER BY v DESC) FROM t"
        );
    }

    #[test]
    fn test_unordered_group_concat_keeps_generic_shape() {
        assert_eq!(
            transpile("SELECT GROUP_CONCAT(name SEPARATOR '|') FROM t"),
            "SELECT GROUP_CONCAT(name SEPARATOR '|') FROM t"
        );
    }

    #[test]
    fn test_hex_literals() {
        assert_eq!(
            transpile("SELECT x'48AF' FROM t"),
            "SELECT X'48AF' FROM t"
        );
    }
}
