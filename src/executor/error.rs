//! Executor error types

use std::fmt;

use crate::catalog::{CatalogError, KindMismatch};

/// Result type for executor operations
pub type ExecResult<T> = Result<T, ExecError>;

/// Executor errors
#[derive(Debug)]
pub enum ExecError {
    /// Table not found in the schema when a slot was first referenced
    TableNotFound(String),

    /// Column `(name, base_table)` not found during execution
    ColumnNotFound { table: String, column: String },

    /// Predicate compared fields of different kinds
    KindMismatch {
        context: String,
        source: KindMismatch,
    },

    /// Building an intermediate table failed
    Catalog(CatalogError),

    /// Internal executor error
    Internal(String),
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::TableNotFound(name) => write!(f, "table not found: {}", name),
            ExecError::ColumnNotFound { table, column } => {
                write!(f, "column not found: {}.{}", table, column)
            }
            ExecError::KindMismatch { context, source } => {
                write!(f, "{} in {}", source, context)
            }
            ExecError::Catalog(e) => write!(f, "catalog error: {}", e),
            ExecError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ExecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecError::KindMismatch { source, .. } => Some(source),
            ExecError::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for ExecError {
    fn from(e: CatalogError) -> Self {
        ExecError::Catalog(e)
    }
}
