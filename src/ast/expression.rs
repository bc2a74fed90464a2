//! Expression AST types, including dialect extension nodes.

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Hexadecimal string literal; holds the raw digit text.
    Hex(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// A matched multi-word qualifier clause (e.g. `WITH ARRAY WRAPPER`).
///
/// Produced by the option grammar matcher; both parts are stored uppercased
/// exactly as matched, so rendering is a straight join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionClause {
    /// The leading keyword that selected the grammar row (e.g. `WITH`).
    pub keyword: String,
    /// The matched candidate suffix, single-space joined (e.g. `ARRAY WRAPPER`).
    pub suffix: String,
}

impl OptionClause {
    /// Returns the full clause text, single-space joined.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.keyword, self.suffix)
    }
}

/// Whether an extraction keeps or strips quotes around scalar results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// `KEEP QUOTES`
    Keep,
    /// `OMIT QUOTES`
    Omit,
}

impl QuoteMode {
    /// Returns the SQL keyword for the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "KEEP",
            Self::Omit => "OMIT",
        }
    }
}

/// A trailing quote directive on an extraction call.
///
/// Only meaningful when the owning [`Expr::JsonExtract`] has `query` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotePolicy {
    /// Keep or omit quotes.
    pub mode: QuoteMode,
    /// Whether `ON SCALAR STRING` followed the directive.
    pub scalar: bool,
}

/// Overflow behavior of an ordered-aggregate call (`ON OVERFLOW ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowClause {
    /// `ON OVERFLOW ERROR`
    Error,
    /// `ON OVERFLOW TRUNCATE ['filler']`
    Truncate(Option<String>),
}

/// The kind tag of an expression, used as the transform dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Literal,
    Column,
    Binary,
    Unary,
    Function,
    Subquery,
    IsNull,
    In,
    Between,
    Case,
    Cast,
    Paren,
    Parameter,
    Wildcard,
    JsonExtract,
    GroupConcat,
    OrderWrap,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A subquery.
    Subquery(Box<super::SelectStatement>),

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: super::DataType,
    },

    /// Parenthesized expression.
    Paren(Box<Expr>),

    /// A parameter placeholder (? or :name).
    Parameter {
        /// The parameter name, if named.
        name: Option<String>,
        /// Position in the query (1-based for ? placeholders).
        position: usize,
    },

    /// Wildcard (*) in SELECT.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },

    /// Structured-data extraction (JSON path lookup).
    JsonExtract {
        /// The document expression.
        subject: Box<Expr>,
        /// Path expression; `None` means the path applies to the subject
        /// itself.
        path: Option<Box<Expr>>,
        /// Wrapper option clause, if one was parsed.
        option: Option<OptionClause>,
        /// True for the query-shaped call (`JSON_QUERY`), false for the
        /// plain extraction shape.
        query: bool,
        /// Quote directive; only meaningful when `query` is true.
        quote: Option<QuotePolicy>,
    },

    /// String aggregation (`GROUP_CONCAT` and per-dialect equivalents).
    GroupConcat {
        /// Aggregated expression, possibly wrapped in [`Expr::OrderWrap`].
        this: Box<Expr>,
        /// Separator literal; dialects default it when absent.
        separator: Option<Box<Expr>>,
        /// Overflow directive, if present.
        on_overflow: Option<OverflowClause>,
    },

    /// An expression carrying a required result ordering.
    ///
    /// Appears as the argument of ordered aggregates. Dialects that express
    /// ordering as a trailing clause split the target out and render the
    /// items separately; see the generator's group-concat renderers.
    OrderWrap {
        /// The ordered expression.
        target: Option<Box<Expr>>,
        /// The ordering items (direction and nulls placement).
        items: Vec<super::OrderBy>,
    },
}

impl Expr {
    /// Returns the dispatch kind tag of this expression.
    #[must_use]
    pub const fn kind(&self) -> ExprKind {
        match self {
            Self::Literal(_) => ExprKind::Literal,
            Self::Column { .. } => ExprKind::Column,
            Self::Binary { .. } => ExprKind::Binary,
            Self::Unary { .. } => ExprKind::Unary,
            Self::Function(_) => ExprKind::Function,
            Self::Subquery(_) => ExprKind::Subquery,
            Self::IsNull { .. } => ExprKind::IsNull,
            Self::In { .. } => ExprKind::In,
            Self::Between { .. } => ExprKind::Between,
            Self::Case { .. } => ExprKind::Case,
            Self::Cast { .. } => ExprKind::Cast,
            Self::Paren(_) => ExprKind::Paren,
            Self::Parameter { .. } => ExprKind::Parameter,
            Self::Wildcard { .. } => ExprKind::Wildcard,
            Self::JsonExtract { .. } => ExprKind::JsonExtract,
            Self::GroupConcat { .. } => ExprKind::GroupConcat,
            Self::OrderWrap { .. } => ExprKind::OrderWrap,
        }
    }

    /// Creates a column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal(Literal::Integer(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Expr::integer(1).kind(), ExprKind::Literal);
        assert_eq!(Expr::column("a").kind(), ExprKind::Column);
        let extract = Expr::JsonExtract {
            subject: Box::new(Expr::column("doc")),
            path: None,
            option: None,
            query: true,
            quote: None,
        };
        assert_eq!(extract.kind(), ExprKind::JsonExtract);
    }

    #[test]
    fn test_option_clause_text() {
        let opt = OptionClause {
            keyword: String::from("WITH"),
            suffix: String::from("ARRAY WRAPPER"),
        };
        assert_eq!(opt.text(), "WITH ARRAY WRAPPER");
    }

    #[test]
    fn test_quote_mode_as_str() {
        assert_eq!(QuoteMode::Keep.as_str(), "KEEP");
        assert_eq!(QuoteMode::Omit.as_str(), "OMIT");
    }
}
