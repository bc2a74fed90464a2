//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Expression nodes carry a fieldless kind tag ([`ExprKind`]) that dialects
//! key their transform dispatch tables on.

mod expression;
mod statement;
mod types;

pub use expression::{
    BinaryOp, Expr, ExprKind, FunctionCall, Literal, OptionClause, OverflowClause, QuoteMode,
    QuotePolicy, UnaryOp,
};
pub use statement::{
    DeleteStatement, InsertSource, InsertStatement, JoinClause, JoinType, NullOrdering, OrderBy,
    OrderDirection, SelectColumn, SelectStatement, Statement, TableRef, UpdateAssignment,
    UpdateStatement,
};
pub use types::DataType;
