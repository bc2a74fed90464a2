//! Dialect composition: deriving, overriding, and registry shadowing.

mod common;

use common::{first_column, round_trip};
use sqlport::ast::{Expr, ExprKind, FunctionCall};
use sqlport::lexer::{LiteralStyleSpec, StringStyle};
use sqlport::{Dialect, Generator, ParseError, Parser, RenderError};

fn parse_marker(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let arg = parser.parse_bitwise()?;
    Ok(Expr::Function(FunctionCall {
        name: String::from("MARKER"),
        args: vec![arg],
        distinct: false,
    }))
}

fn render_literal_bracketed(g: &Generator<'_>, e: &Expr) -> Result<String, RenderError> {
    let Expr::Literal(_) = e else {
        return Err(RenderError::Unsupported(e.kind()));
    };
    // Delegate nothing; mark the output so the override is observable.
    Ok(format!("<{e:?}>"))
}

#[test]
fn derived_dialect_inherits_base_behavior() {
    let base = Dialect::generic();
    let derived = base.derive("derived").build();
    assert_eq!(
        round_trip("SELECT GROUP_CONCAT(name) FROM t", &derived),
        round_trip("SELECT GROUP_CONCAT(name) FROM t", &base)
    );
}

#[test]
fn derived_function_shadows_inherited_routine() {
    let derived = Dialect::generic()
        .derive("derived")
        .function("group_concat", parse_marker)
        .build();
    let expr = first_column("SELECT GROUP_CONCAT(name)", &derived);
    assert!(matches!(
        expr,
        Expr::Function(FunctionCall { ref name, .. }) if name == "MARKER"
    ));
}

#[test]
fn transform_override_changes_rendering_without_touching_the_base() {
    let base = Dialect::generic();
    let derived = base
        .derive("derived")
        .transform(ExprKind::Literal, render_literal_bracketed)
        .build();

    let base_out = round_trip("SELECT 1", &base);
    let derived_out = round_trip("SELECT 1", &derived);

    assert_eq!(base_out, "SELECT 1");
    assert_ne!(derived_out, base_out);
    assert!(derived_out.starts_with("SELECT <"));

    // The base dialect still renders through its own table.
    assert_eq!(round_trip("SELECT 1", &base), "SELECT 1");
}

#[test]
fn transform_override_replaces_only_the_overridden_entry() {
    let base = Dialect::generic();
    let derived = base
        .derive("derived")
        .transform(ExprKind::Literal, render_literal_bracketed)
        .build();

    assert!(derived.transform(ExprKind::Literal) != base.transform(ExprKind::Literal));
    assert!(derived.transform(ExprKind::Column) == base.transform(ExprKind::Column));
}

#[test]
fn registering_a_literal_style_changes_lexing_only_for_that_dialect() {
    let base = Dialect::generic();
    let hexed = base
        .derive("hexed")
        .string_style(LiteralStyleSpec {
            open: "X'",
            close: "'",
            style: StringStyle::Hex,
        })
        .build();

    assert_eq!(round_trip("SELECT X'00ff'", &hexed), "SELECT X'00ff'");
    assert!(sqlport::parse("SELECT X'00ff'", &base).is_err());
}

#[test]
fn function_names_shadow_across_casings() {
    let dialect = Dialect::generic()
        .derive("cased")
        .function("My_Func", parse_marker)
        .build();
    for spelling in ["my_func", "MY_FUNC", "My_Func"] {
        let expr = first_column(&format!("SELECT {spelling}(1)"), &dialect);
        assert!(matches!(
            expr,
            Expr::Function(FunctionCall { ref name, .. }) if name == "MARKER"
        ));
    }
}

#[test]
fn trino_derives_from_generic() {
    let trino = Dialect::trino();
    assert_eq!(trino.name(), "trino");
    // Inherited routines keep working.
    assert!(trino.function_parser("GROUP_CONCAT").is_some());
    assert!(trino.function_parser("JSON_EXTRACT").is_some());
    // And the Trino additions are present.
    assert!(trino.function_parser("JSON_QUERY").is_some());
}

#[test]
fn dialects_are_shareable_across_threads() {
    let dialect = std::sync::Arc::new(Dialect::trino());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dialect = std::sync::Arc::clone(&dialect);
            std::thread::spawn(move || {
                round_trip(&format!("SELECT {i} FROM t"), &dialect)
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
