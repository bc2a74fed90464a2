//! SQL data types (CAST targets).

/// A SQL data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// INTEGER
    Integer,
    /// SMALLINT
    Smallint,
    /// BIGINT
    Bigint,
    /// REAL
    Real,
    /// DOUBLE
    Double,
    /// DECIMAL(p, s)
    Decimal {
        /// Precision.
        precision: Option<u16>,
        /// Scale.
        scale: Option<u16>,
    },
    /// CHAR(n)
    Char(Option<u32>),
    /// VARCHAR(n)
    Varchar(Option<u32>),
    /// TEXT
    Text,
    /// BOOLEAN
    Boolean,
    /// DATE
    Date,
    /// TIME
    Time,
    /// TIMESTAMP
    Timestamp,
    /// Any other named type, passed through verbatim.
    Custom(String),
}

impl DataType {
    /// Renders the type as SQL.
    #[must_use]
    pub fn sql(&self) -> String {
        match self {
            Self::Integer => String::from("INTEGER"),
            Self::Smallint => String::from("SMALLINT"),
            Self::Bigint => String::from("BIGINT"),
            Self::Real => String::from("REAL"),
            Self::Double => String::from("DOUBLE"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => String::from("DECIMAL"),
            },
            Self::Char(len) => match len {
                Some(n) => format!("CHAR({n})"),
                None => String::from("CHAR"),
            },
            Self::Varchar(len) => match len {
                Some(n) => format!("VARCHAR({n})"),
                None => String::from("VARCHAR"),
            },
            Self::Text => String::from("TEXT"),
            Self::Boolean => String::from("BOOLEAN"),
            Self::Date => String::from("DATE"),
            Self::Time => String::from("TIME"),
            Self::Timestamp => String::from("TIMESTAMP"),
            Self::Custom(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_types() {
        assert_eq!(DataType::Integer.sql(), "INTEGER");
        assert_eq!(DataType::Text.sql(), "TEXT");
    }

    #[test]
    fn test_parameterized_types() {
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .sql(),
            "DECIMAL(10, 2)"
        );
        assert_eq!(DataType::Varchar(Some(32)).sql(), "VARCHAR(32)");
        assert_eq!(DataType::Varchar(None).sql(), "VARCHAR");
    }
}
