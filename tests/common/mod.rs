//! Shared helpers for integration tests.
#![allow(dead_code)] // each test binary uses a subset of these helpers

use sqlport::ast::{Expr, Statement};
use sqlport::{Dialect, Generator, Parser};

/// Parses a single statement, panicking on failure.
pub fn parse_one(sql: &str, dialect: &Dialect) -> Statement {
    Parser::new(sql, dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("failed to parse {sql:?}: {e}"))
}

/// Parses and re-renders a statement under one dialect.
pub fn round_trip(sql: &str, dialect: &Dialect) -> String {
    let statement = parse_one(sql, dialect);
    Generator::new(dialect)
        .statement(&statement)
        .unwrap_or_else(|e| panic!("failed to render {sql:?}: {e}"))
}

/// Returns the first projected expression of a SELECT statement.
pub fn first_column(sql: &str, dialect: &Dialect) -> Expr {
    let Statement::Select(select) = parse_one(sql, dialect) else {
        panic!("expected a SELECT statement for {sql:?}");
    };
    select
        .columns
        .into_iter()
        .next()
        .expect("SELECT with no columns")
        .expr
}
