//! The generic dialect: base parse routines and the default transform table.
//!
//! Every expression kind has an entry here, so derived dialects start from a
//! total table and only override the kinds they render differently. The
//! render functions are crate-visible so overrides can delegate back to the
//! generic output on the shapes they leave alone.

use super::Dialect;
use crate::ast::{
    Expr, ExprKind, FunctionCall, Literal, OptionClause, OverflowClause, QuotePolicy,
};
use crate::generator::{Generator, RenderError};
use crate::lexer::{Keyword, StringStyle, TokenKind};
use crate::parser::{ParseError, Parser};

impl Dialect {
    /// The generic SQL dialect.
    ///
    /// Base tokenizer, `GROUP_CONCAT` and `JSON_EXTRACT` parse routines, and
    /// generic renderers for every expression kind.
    #[must_use]
    pub fn generic() -> Self {
        Self::builder("generic")
            .function("GROUP_CONCAT", parse_group_concat)
            .function("JSON_EXTRACT", parse_json_extract)
            .transform(ExprKind::Literal, render_literal)
            .transform(ExprKind::Column, render_column)
            .transform(ExprKind::Binary, render_binary)
            .transform(ExprKind::Unary, render_unary)
            .transform(ExprKind::Function, render_function)
            .transform(ExprKind::Subquery, render_subquery)
            .transform(ExprKind::IsNull, render_is_null)
            .transform(ExprKind::In, render_in)
            .transform(ExprKind::Between, render_between)
            .transform(ExprKind::Case, render_case)
            .transform(ExprKind::Cast, render_cast)
            .transform(ExprKind::Paren, render_paren)
            .transform(ExprKind::Parameter, render_parameter)
            .transform(ExprKind::Wildcard, render_wildcard)
            .transform(ExprKind::JsonExtract, render_json_extract)
            .transform(ExprKind::GroupConcat, render_group_concat)
            .transform(ExprKind::OrderWrap, render_order_wrap)
            .build()
    }
}

// --- Parse routines ---

/// Parses `GROUP_CONCAT(<expr> [ORDER BY ...] [ON OVERFLOW ...] [SEPARATOR '...'])`.
pub(crate) fn parse_group_concat(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let arg = parser.parse_bitwise()?;

    let this = if parser.check_keyword(Keyword::Order) {
        parser.advance();
        parser.expect_keyword(Keyword::By)?;
        let items = parser.parse_order_by_list()?;
        Expr::OrderWrap {
            target: Some(Box::new(arg)),
            items,
        }
    } else {
        arg
    };

    let on_overflow = if parser.match_text_seq(&["ON", "OVERFLOW"]).is_some() {
        Some(parse_overflow_clause(parser)?)
    } else {
        None
    };

    let separator = if parser.match_word("SEPARATOR") {
        Some(Box::new(Expr::Literal(Literal::String(
            parser.expect_string()?,
        ))))
    } else {
        None
    };

    Ok(Expr::GroupConcat {
        this: Box::new(this),
        separator,
        on_overflow,
    })
}

/// Parses the tail of an `ON OVERFLOW` directive (both words consumed).
pub(crate) fn parse_overflow_clause(parser: &mut Parser<'_>) -> Result<OverflowClause, ParseError> {
    if parser.match_word("ERROR") {
        return Ok(OverflowClause::Error);
    }
    if parser.match_word("TRUNCATE") {
        let filler = if parser.check(&TokenKind::String {
            value: String::new(),
            style: StringStyle::Plain,
        }) {
            Some(parser.expect_string()?)
        } else {
            None
        };
        return Ok(OverflowClause::Truncate(filler));
    }
    Err(ParseError::unexpected(
        "ERROR or TRUNCATE",
        parser.current().kind.clone(),
        parser.span(),
    ))
}

/// Parses `JSON_EXTRACT(<subject> [, <path>])`.
pub(crate) fn parse_json_extract(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let subject = parser.parse_bitwise()?;
    let path = if parser.eat(&TokenKind::Comma) {
        Some(Box::new(parser.parse_bitwise()?))
    } else {
        None
    };

    Ok(Expr::JsonExtract {
        subject: Box::new(subject),
        path,
        option: None,
        query: false,
        quote: None,
    })
}

// --- Render functions ---

pub(crate) fn render_literal(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Literal(literal) = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(match literal {
        Literal::Integer(n) => n.to_string(),
        Literal::Float(f) => f.to_string(),
        Literal::String(s) => g.string_literal(s),
        Literal::Hex(digits) => format!("X'{digits}'"),
        Literal::Boolean(true) => String::from("TRUE"),
        Literal::Boolean(false) => String::from("FALSE"),
        Literal::Null => String::from("NULL"),
    })
}

pub(crate) fn render_column(_g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Column { table, name } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(match table {
        Some(table) => format!("{table}.{name}"),
        None => name.clone(),
    })
}

pub(crate) fn render_binary(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Binary { left, op, right } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(format!(
        "{} {} {}",
        g.expr(left)?,
        op.as_str(),
        g.expr(right)?
    ))
}

pub(crate) fn render_unary(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Unary { op, operand } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(match op {
        crate::ast::UnaryOp::Not => format!("NOT {}", g.expr(operand)?),
        _ => format!("{}{}", op.as_str(), g.expr(operand)?),
    })
}

pub(crate) fn render_function(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Function(FunctionCall {
        name,
        args,
        distinct,
    }) = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };

    if name == "EXISTS" {
        if let [Expr::Subquery(query)] = args.as_slice() {
            return Ok(format!("EXISTS ({})", g.select(query)?));
        }
    }

    let rendered_args = g.expr_list(args)?;
    if *distinct {
        Ok(format!("{name}(DISTINCT {rendered_args})"))
    } else {
        Ok(format!("{name}({rendered_args})"))
    }
}

pub(crate) fn render_subquery(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Subquery(query) = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(format!("({})", g.select(query)?))
}

pub(crate) fn render_is_null(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::IsNull { expr, negated } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
    Ok(format!("{} {keyword}", g.expr(expr)?))
}

pub(crate) fn render_in(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::In {
        expr,
        list,
        negated,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    let keyword = if *negated { "NOT IN" } else { "IN" };
    Ok(format!(
        "{} {keyword} ({})",
        g.expr(expr)?,
        g.expr_list(list)?
    ))
}

pub(crate) fn render_between(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Between {
        expr,
        low,
        high,
        negated,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    let keyword = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
    Ok(format!(
        "{} {keyword} {} AND {}",
        g.expr(expr)?,
        g.expr(low)?,
        g.expr(high)?
    ))
}

pub(crate) fn render_case(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Case {
        operand,
        when_clauses,
        else_clause,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };

    let mut sql = String::from("CASE");
    if let Some(operand) = operand {
        sql.push(' ');
        sql.push_str(&g.expr(operand)?);
    }
    for (when_expr, then_expr) in when_clauses {
        sql.push_str(" WHEN ");
        sql.push_str(&g.expr(when_expr)?);
        sql.push_str(" THEN ");
        sql.push_str(&g.expr(then_expr)?);
    }
    if let Some(else_expr) = else_clause {
        sql.push_str(" ELSE ");
        sql.push_str(&g.expr(else_expr)?);
    }
    sql.push_str(" END");
    Ok(sql)
}

pub(crate) fn render_cast(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Cast { expr, data_type } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(format!("CAST({} AS {})", g.expr(expr)?, data_type.sql()))
}

pub(crate) fn render_paren(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Paren(inner) = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(format!("({})", g.expr(inner)?))
}

pub(crate) fn render_parameter(_g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Parameter { name, .. } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(match name {
        Some(name) => format!(":{name}"),
        None => String::from("?"),
    })
}

pub(crate) fn render_wildcard(_g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Wildcard { table } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    Ok(match table {
        Some(table) => format!("{table}.*"),
        None => String::from("*"),
    })
}

/// Generic extraction rendering: `JSON_EXTRACT(subject[, path])`.
///
/// The wrapper option and quote directive only exist on the query-shaped
/// call, which derived dialects render themselves; the generic shape drops
/// them.
pub(crate) fn render_json_extract(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::JsonExtract { subject, path, .. } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    match path {
        Some(path) => Ok(format!(
            "JSON_EXTRACT({}, {})",
            g.expr(subject)?,
            g.expr(path)?
        )),
        None => Ok(format!("JSON_EXTRACT({})", g.expr(subject)?)),
    }
}

/// Renders an overflow directive without the leading `ON OVERFLOW`.
pub(crate) fn overflow_text(g: &Generator<'_>, clause: &OverflowClause) -> String {
    match clause {
        OverflowClause::Error => String::from("ERROR"),
        OverflowClause::Truncate(None) => String::from("TRUNCATE"),
        OverflowClause::Truncate(Some(filler)) => {
            format!("TRUNCATE {}", g.string_literal(filler))
        }
    }
}

/// Generic aggregation rendering:
/// `GROUP_CONCAT(<this>[ ON OVERFLOW ...][ SEPARATOR '...'])`.
pub(crate) fn render_group_concat(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::GroupConcat {
        this,
        separator,
        on_overflow,
    } = e
    else {
        return Err(RenderError::Unsupported(e.kind()));
    };

    let mut sql = format!("GROUP_CONCAT({}", g.expr(this)?);
    if let Some(clause) = on_overflow {
        sql.push_str(" ON OVERFLOW ");
        sql.push_str(&overflow_text(g, clause));
    }
    if let Some(separator) = separator {
        sql.push_str(" SEPARATOR ");
        sql.push_str(&g.expr(separator)?);
    }
    sql.push(')');
    Ok(sql)
}

pub(crate) fn render_order_wrap(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::OrderWrap { target, items } = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    let ordering = g.order_items(items)?;
    match target {
        Some(target) => Ok(format!("{} ORDER BY {ordering}", g.expr(target)?)),
        None => Ok(format!("ORDER BY {ordering}")),
    }
}

/// Joins the option clause and quote directive of a query-shaped extraction
/// into its trailing text, single-space separated, empty when absent.
pub(crate) fn extraction_tail(option: Option<&OptionClause>, quote: Option<&QuotePolicy>) -> String {
    let mut parts = Vec::new();
    if let Some(option) = option {
        parts.push(option.text());
    }
    if let Some(quote) = quote {
        let mut text = format!("{} QUOTES", quote.mode.as_str());
        if quote.scalar {
            text.push_str(" ON SCALAR STRING");
        }
        parts.push(text);
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Statement;
    use crate::generator::Generator;
    use crate::parser::Parser;

    fn round_trip(sql: &str) -> String {
        let dialect = Dialect::generic();
        let statement = Parser::new(sql, &dialect).parse_statement().unwrap();
        Generator::new(&dialect).statement(&statement).unwrap()
    }

    fn parse_expr(sql: &str) -> Expr {
        let dialect = Dialect::generic();
        let statement = Parser::new(sql, &dialect).parse_statement().unwrap();
        let Statement::Select(select) = statement else {
            panic!("Expected SELECT statement");
        };
        select.columns.into_iter().next().unwrap().expr
    }

    #[test]
    fn test_group_concat_plain() {
        assert_eq!(
            round_trip("SELECT GROUP_CONCAT(name) FROM t"),
            "SELECT GROUP_CONCAT(name) FROM t"
        );
    }

    #[test]
    fn test_group_concat_with_order_and_separator() {
        assert_eq!(
            round_trip("SELECT GROUP_CONCAT(name ORDER BY name DESC SEPARATOR '|') FROM t"),
            "SELECT GROUP_CONCAT(name ORDER BY name DESC SEPARATOR '|') FROM t"
        );
    }

    #[test]
    fn test_group_concat_overflow_truncate() {
        let expr = parse_expr("SELECT GROUP_CONCAT(v ON OVERFLOW TRUNCATE '...' SEPARATOR ',')");
        let Expr::GroupConcat { on_overflow, .. } = expr else {
            panic!("Expected GroupConcat expression");
        };
        assert_eq!(
            on_overflow,
            Some(OverflowClause::Truncate(Some(String::from("..."))))
        );
    }

    #[test]
    fn test_group_concat_overflow_error() {
        let expr = parse_expr("SELECT GROUP_CONCAT(v ON OVERFLOW ERROR)");
        let Expr::GroupConcat { on_overflow, .. } = expr else {
            panic!("Expected GroupConcat expression");
        };
        assert_eq!(on_overflow, Some(OverflowClause::Error));
    }

    #[test]
    fn test_json_extract_with_path() {
        assert_eq!(
            round_trip("SELECT JSON_EXTRACT(doc, '$.a') FROM t"),
            "SELECT JSON_EXTRACT(doc, '$.a') FROM t"
        );
    }

    #[test]
    fn test_json_extract_without_path() {
        let expr = parse_expr("SELECT JSON_EXTRACT(doc)");
        assert!(matches!(
            expr,
            Expr::JsonExtract {
                path: None,
                query: false,
                ..
            }
        ));
    }

    #[test]
    fn test_extraction_tail_empty_when_absent() {
        assert_eq!(extraction_tail(None, None), "");
    }

    #[test]
    fn test_extraction_tail_joins_with_single_spaces() {
        let option = OptionClause {
            keyword: String::from("WITH"),
            suffix: String::from("ARRAY WRAPPER"),
        };
        let quote = QuotePolicy {
            mode: crate::ast::QuoteMode::Omit,
            scalar: true,
        };
        assert_eq!(
            extraction_tail(Some(&option), Some(&quote)),
            "WITH ARRAY WRAPPER OMIT QUOTES ON SCALAR STRING"
        );
    }
}
