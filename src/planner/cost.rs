//! Cost model shared by all planning strategies
//!
//! The numbers are synthetic and comparative: they rank plans against
//! each other, they do not predict wall-clock time.

use crate::catalog::Schema;
use crate::query::ScalarFilter;

use super::error::{PlanError, PlanResult};

/// Per-row scan cost applied to a filter's input
pub const SCAN_COST: f64 = 1.0;

/// Per-row I/O cost applied to both join operands
pub const IO_COST: f64 = 1.0;

/// Per-pair CPU cost of the nested-loop comparison
pub const CPU_COST: f64 = 0.1;

/// An operator's estimated cost and selectivity
#[derive(Debug, Clone, Copy)]
pub struct CostEstimate {
    /// Estimated cost in synthetic units
    pub cost: f64,
    /// Estimated fraction of surviving rows, in [0, 1]
    pub selectivity: f64,
}

/// Estimate a scalar filter against the base table's histogram
///
/// The input size is always the base table's row count; planners apply
/// the selectivity to their own running size estimates separately.
pub fn filter_estimate(schema: &Schema, filter: &ScalarFilter) -> PlanResult<CostEstimate> {
    let table = schema
        .table(&filter.table)
        .ok_or_else(|| PlanError::TableNotFound(filter.table.clone()))?;

    let selectivity = table.estimate_selectivity(&filter.column, filter.op, &filter.value)?;
    let input_size = table.len() as f64;
    let cost = input_size * SCAN_COST + input_size * selectivity;

    Ok(CostEstimate { cost, selectivity })
}

/// Estimate an equi-join between operands of the given current sizes
///
/// Selectivity is `min/max` of the operand sizes; cost is the two-sided
/// nested-loop model. Column identities deliberately do not participate.
pub fn join_estimate(left_size: usize, right_size: usize) -> CostEstimate {
    let smaller = left_size.min(right_size) as f64;
    let larger = left_size.max(right_size) as f64;
    let selectivity = if larger == 0.0 { 0.0 } else { smaller / larger };

    let io_cost = (left_size + right_size) as f64 * IO_COST;
    let cpu_cost = left_size as f64 * right_size as f64 * CPU_COST;

    CostEstimate {
        cost: io_cost + cpu_cost,
        selectivity,
    }
}

/// Estimated row count of an equi-join's output
pub fn join_output_size(left_size: usize, right_size: usize) -> usize {
    left_size.min(right_size)
}
