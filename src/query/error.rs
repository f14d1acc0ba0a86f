//! Query error types
//!
//! Covers both malformed query-description blocks and validation
//! failures against the schema.

use std::fmt;

use crate::catalog::FieldKind;

/// Result type for query parsing and validation
pub type QueryResult<T> = Result<T, QueryError>;

/// Query description or validation error
#[derive(Debug, Clone)]
pub enum QueryError {
    /// Block contained no tables
    EmptyQuery,

    /// Item could not be parsed (bad `table.column` or operator syntax)
    Malformed(String),

    /// Literal could not be parsed as the column's kind
    InvalidLiteral { value: String, column: String },

    /// Referenced table does not exist in the schema
    TableNotFound(String),

    /// Table referenced by a filter or join is missing from `tables`
    TableNotListed(String),

    /// Referenced column does not exist on its base table
    ColumnNotFound { table: String, column: String },

    /// Scalar filter literal kind does not match the column kind
    FilterKindMismatch {
        table: String,
        column: String,
        expected: FieldKind,
        got: FieldKind,
    },

    /// The two sides of a join or dynamic filter have different kinds
    JoinKindMismatch {
        left: String,
        left_kind: FieldKind,
        right: String,
        right_kind: FieldKind,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::EmptyQuery => write!(f, "query block names no tables"),
            QueryError::Malformed(item) => write!(f, "malformed query item: {}", item),
            QueryError::InvalidLiteral { value, column } => {
                write!(f, "invalid literal '{}' for column {}", value, column)
            }
            QueryError::TableNotFound(name) => write!(f, "table not found: {}", name),
            QueryError::TableNotListed(name) => {
                write!(f, "table '{}' is referenced but not listed in tables", name)
            }
            QueryError::ColumnNotFound { table, column } => {
                write!(f, "column not found: {}.{}", table, column)
            }
            QueryError::FilterKindMismatch {
                table,
                column,
                expected,
                got,
            } => write!(
                f,
                "filter on {}.{} expects {}, got {}",
                table, column, expected, got
            ),
            QueryError::JoinKindMismatch {
                left,
                left_kind,
                right,
                right_kind,
            } => write!(
                f,
                "join kind mismatch: {} is {}, {} is {}",
                left, left_kind, right, right_kind
            ),
        }
    }
}

impl std::error::Error for QueryError {}
