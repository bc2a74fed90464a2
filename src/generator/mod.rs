//! SQL generation.
//!
//! The generator renders AST nodes back to SQL text. Statement shapes render
//! the same way everywhere and live here as methods; expression rendering is
//! dispatched through the dialect's transform table, so a dialect overrides
//! the output of one expression kind by registering a different render
//! function for it.

use thiserror::Error;

use crate::ast::{
    Expr, ExprKind, InsertSource, OrderBy, SelectStatement, Statement, TableRef,
};
use crate::dialect::Dialect;

/// An error produced while rendering SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The dialect's transform table has no entry for this expression kind.
    #[error("dialect has no renderer for {0:?} expressions")]
    Unsupported(ExprKind),
}

/// Renders AST nodes as SQL text for one dialect.
pub struct Generator<'a> {
    dialect: &'a Dialect,
}

impl<'a> Generator<'a> {
    /// Creates a generator for the given dialect.
    #[must_use]
    pub const fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the dialect this generator renders for.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        self.dialect
    }

    /// Renders an expression through the dialect's transform table.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Unsupported`] if the table has no entry for
    /// the expression's kind.
    pub fn expr(&self, expr: &Expr) -> Result<String, RenderError> {
        match self.dialect.transform(expr.kind()) {
            Some(render) => render(self, expr),
            None => Err(RenderError::Unsupported(expr.kind())),
        }
    }

    /// Renders a statement.
    ///
    /// # Errors
    ///
    /// Propagates expression render errors.
    pub fn statement(&self, statement: &Statement) -> Result<String, RenderError> {
        match statement {
            Statement::Select(select) => self.select(select),
            Statement::Insert(insert) => {
                let mut sql = String::from("INSERT INTO ");
                sql.push_str(&qualified_name(insert.schema.as_deref(), &insert.table));

                if !insert.columns.is_empty() {
                    sql.push_str(" (");
                    sql.push_str(&insert.columns.join(", "));
                    sql.push(')');
                }

                match &insert.values {
                    InsertSource::Values(rows) => {
                        sql.push_str(" VALUES ");
                        let mut rendered_rows = Vec::with_capacity(rows.len());
                        for row in rows {
                            rendered_rows.push(format!("({})", self.expr_list(row)?));
                        }
                        sql.push_str(&rendered_rows.join(", "));
                    }
                    InsertSource::Query(query) => {
                        sql.push(' ');
                        sql.push_str(&self.select(query)?);
                    }
                    InsertSource::DefaultValues => sql.push_str(" DEFAULT VALUES"),
                }

                Ok(sql)
            }
            Statement::Update(update) => {
                let mut sql = String::from("UPDATE ");
                sql.push_str(&qualified_name(update.schema.as_deref(), &update.table));
                if let Some(alias) = &update.alias {
                    sql.push(' ');
                    sql.push_str(alias);
                }

                sql.push_str(" SET ");
                let mut assignments = Vec::with_capacity(update.assignments.len());
                for assignment in &update.assignments {
                    assignments.push(format!(
                        "{} = {}",
                        assignment.column,
                        self.expr(&assignment.value)?
                    ));
                }
                sql.push_str(&assignments.join(", "));

                if let Some(where_clause) = &update.where_clause {
                    sql.push_str(" WHERE ");
                    sql.push_str(&self.expr(where_clause)?);
                }

                Ok(sql)
            }
            Statement::Delete(delete) => {
                let mut sql = String::from("DELETE FROM ");
                sql.push_str(&qualified_name(delete.schema.as_deref(), &delete.table));
                if let Some(alias) = &delete.alias {
                    sql.push(' ');
                    sql.push_str(alias);
                }

                if let Some(where_clause) = &delete.where_clause {
                    sql.push_str(" WHERE ");
                    sql.push_str(&self.expr(where_clause)?);
                }

                Ok(sql)
            }
        }
    }

    /// Renders a SELECT statement.
    ///
    /// # Errors
    ///
    /// Propagates expression render errors.
    pub fn select(&self, select: &SelectStatement) -> Result<String, RenderError> {
        let mut sql = String::from("SELECT ");

        if select.distinct {
            sql.push_str("DISTINCT ");
        }

        let mut columns = Vec::with_capacity(select.columns.len());
        for column in &select.columns {
            let rendered = self.expr(&column.expr)?;
            match &column.alias {
                Some(alias) => columns.push(format!("{rendered} AS {alias}")),
                None => columns.push(rendered),
            }
        }
        sql.push_str(&columns.join(", "));

        if let Some(from) = &select.from {
            sql.push_str(" FROM ");
            sql.push_str(&self.table_ref(from)?);
        }

        if let Some(where_clause) = &select.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.expr(where_clause)?);
        }

        if !select.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.expr_list(&select.group_by)?);
        }

        if let Some(having) = &select.having {
            sql.push_str(" HAVING ");
            sql.push_str(&self.expr(having)?);
        }

        if !select.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_items(&select.order_by)?);
        }

        if let Some(limit) = &select.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&self.expr(limit)?);
        }

        if let Some(offset) = &select.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&self.expr(offset)?);
        }

        Ok(sql)
    }

    /// Renders a table reference.
    ///
    /// # Errors
    ///
    /// Propagates expression render errors from join conditions and
    /// subqueries.
    pub fn table_ref(&self, table_ref: &TableRef) -> Result<String, RenderError> {
        match table_ref {
            TableRef::Table {
                schema,
                name,
                alias,
            } => {
                let mut sql = qualified_name(schema.as_deref(), name);
                if let Some(alias) = alias {
                    sql.push(' ');
                    sql.push_str(alias);
                }
                Ok(sql)
            }
            TableRef::Subquery { query, alias } => {
                Ok(format!("({}) {alias}", self.select(query)?))
            }
            TableRef::Join { left, join } => {
                let mut sql = self.table_ref(left)?;

                let join_kw = match join.join_type {
                    crate::ast::JoinType::Inner => "JOIN",
                    crate::ast::JoinType::Left => "LEFT JOIN",
                    crate::ast::JoinType::Right => "RIGHT JOIN",
                    crate::ast::JoinType::Full => "FULL JOIN",
                    crate::ast::JoinType::Cross => "CROSS JOIN",
                };
                sql.push(' ');
                sql.push_str(join_kw);
                sql.push(' ');
                sql.push_str(&self.table_ref(&join.table)?);

                if let Some(on) = &join.on {
                    sql.push_str(" ON ");
                    sql.push_str(&self.expr(on)?);
                } else if !join.using.is_empty() {
                    sql.push_str(" USING (");
                    sql.push_str(&join.using.join(", "));
                    sql.push(')');
                }

                Ok(sql)
            }
        }
    }

    /// Renders a comma-separated expression list.
    ///
    /// # Errors
    ///
    /// Propagates expression render errors.
    pub fn expr_list(&self, exprs: &[Expr]) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(exprs.len());
        for expr in exprs {
            parts.push(self.expr(expr)?);
        }
        Ok(parts.join(", "))
    }

    /// Renders ordering items (without the leading `ORDER BY`).
    ///
    /// # Errors
    ///
    /// Propagates expression render errors.
    pub fn order_items(&self, items: &[OrderBy]) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(items.len());
        for item in items {
            let mut part = self.expr(&item.expr)?;
            if item.direction == crate::ast::OrderDirection::Desc {
                part.push_str(" DESC");
            }
            if let Some(nulls) = item.nulls {
                part.push(' ');
                part.push_str(nulls.as_str());
            }
            parts.push(part);
        }
        Ok(parts.join(", "))
    }

    /// Renders a string literal with doubled-quote escaping.
    #[must_use]
    pub fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }
}

/// Joins an optional schema and a name with a dot.
fn qualified_name(schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(schema) => format!("{schema}.{name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(sql: &str) -> String {
        let dialect = Dialect::generic();
        let statement = crate::parser::Parser::new(sql, &dialect)
            .parse_statement()
            .unwrap();
        Generator::new(&dialect).statement(&statement).unwrap()
    }

    #[test]
    fn test_select_round_trip() {
        assert_eq!(
            render("select id, name from users where id = 1"),
            "SELECT id, name FROM users WHERE id = 1"
        );
    }

    #[test]
    fn test_select_clause_ordering() {
        assert_eq!(
            render("SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1 ORDER BY a LIMIT 10 OFFSET 5"),
            "SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1 ORDER BY a LIMIT 10 OFFSET 5"
        );
    }

    #[test]
    fn test_join_rendering() {
        assert_eq!(
            render("SELECT u.id FROM users u LEFT OUTER JOIN orders o ON u.id = o.user_id"),
            "SELECT u.id FROM users u LEFT JOIN orders o ON u.id = o.user_id"
        );
    }

    #[test]
    fn test_insert_rendering() {
        assert_eq!(
            render("INSERT INTO users (name) VALUES ('it''s')"),
            "INSERT INTO users (name) VALUES ('it''s')"
        );
    }

    #[test]
    fn test_update_rendering() {
        assert_eq!(
            render("UPDATE users SET name = 'Bob' WHERE id = 1"),
            "UPDATE users SET name = 'Bob' WHERE id = 1"
        );
    }

    #[test]
    fn test_delete_rendering() {
        assert_eq!(
            render("DELETE FROM logs WHERE ts < 100"),
            "DELETE FROM logs WHERE ts < 100"
        );
    }

    #[test]
    fn test_order_items_with_nulls() {
        assert_eq!(
            render("SELECT a FROM t ORDER BY a DESC NULLS FIRST, b"),
            "SELECT a FROM t ORDER BY a DESC NULLS FIRST, b"
        );
    }

    #[test]
    fn test_unsupported_kind_errors() {
        let dialect = Dialect::builder("bare").build();
        let generator = Generator::new(&dialect);
        let err = generator.expr(&Expr::integer(1)).unwrap_err();
        assert_eq!(err, RenderError::Unsupported(ExprKind::Literal));
    }

    #[test]
    fn test_string_literal_escaping() {
        let dialect = Dialect::generic();
        let generator = Generator::new(&dialect);
        assert_eq!(generator.string_literal("it's"), "'it''s'");
    }
}
