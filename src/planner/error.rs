//! Planner error types

use std::fmt;

use crate::stats::StatsError;

/// Planner error
#[derive(Debug, Clone)]
pub enum PlanError {
    /// Too many relations for the dynamic-programming planner
    TooManyRelations { count: usize, max: usize },

    /// No remaining join connects the joined set to an unjoined table
    NoApplicableJoin(String),

    /// The declared joins cannot connect all listed tables
    DisconnectedJoinGraph,

    /// Table referenced during planning was not found
    TableNotFound(String),

    /// Selectivity estimation failed
    Stats(StatsError),

    /// Internal planner error
    Internal(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::TooManyRelations { count, max } => {
                write!(f, "{} relations exceed the planner maximum of {}", count, max)
            }
            PlanError::NoApplicableJoin(join) => {
                write!(f, "no applicable join: {} cannot extend the joined set", join)
            }
            PlanError::DisconnectedJoinGraph => {
                write!(f, "declared joins do not connect all listed tables")
            }
            PlanError::TableNotFound(name) => write!(f, "table not found: {}", name),
            PlanError::Stats(e) => write!(f, "selectivity estimation failed: {}", e),
            PlanError::Internal(msg) => write!(f, "internal planner error: {}", msg),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Stats(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StatsError> for PlanError {
    fn from(e: StatsError) -> Self {
        PlanError::Stats(e)
    }
}

/// Result type for planner operations
pub type PlanResult<T> = Result<T, PlanError>;
