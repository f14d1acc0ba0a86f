//! Column statistics - equi-width histograms and selectivity estimation

pub mod histogram;

pub use histogram::{string_to_int, IntHistogram, StringHistogram};

use std::fmt;

use crate::catalog::{CompareOp, FieldKind};

/// Statistics errors
#[derive(Debug, Clone, PartialEq)]
pub enum StatsError {
    /// Column not found on the table being estimated
    ColumnNotFound(String),

    /// Operator has no histogram estimate
    UnsupportedOperator(CompareOp),

    /// Literal kind does not match the column kind
    KindMismatch {
        column: String,
        expected: FieldKind,
        got: FieldKind,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::ColumnNotFound(name) => write!(f, "column not found: {}", name),
            StatsError::UnsupportedOperator(op) => {
                write!(f, "no histogram estimate for operator '{}'", op)
            }
            StatsError::KindMismatch {
                column,
                expected,
                got,
            } => write!(
                f,
                "kind mismatch on column '{}': expected {}, got {}",
                column, expected, got
            ),
        }
    }
}

impl std::error::Error for StatsError {}

/// Result type for statistics operations
pub type StatsResult<T> = Result<T, StatsError>;
