//! The five plan-generation strategies
//!
//! Every strategy shares the same cost primitives and the same size
//! bookkeeping: a map from base-table name to the running row-count
//! estimate after the operators emitted so far.

pub mod dp;
pub mod exhaustive;
pub mod filters_first;
pub mod greedy;
pub mod joins_first;

use std::collections::HashMap;

use crate::catalog::Schema;
use crate::query::{ColumnPair, QuerySpec, ScalarFilter};

use super::cost::{self, CostEstimate};
use super::error::{PlanError, PlanResult};
use super::plan::Component;

/// Running row-count estimate per base-table slot
pub(crate) type SizeMap = HashMap<String, usize>;

/// Initialise the size map with the base sizes of the query's tables
pub(crate) fn init_sizes(schema: &Schema, query: &QuerySpec) -> PlanResult<SizeMap> {
    let mut sizes = SizeMap::with_capacity(query.tables.len());
    for table in &query.tables {
        let size = schema
            .table_size(table)
            .ok_or_else(|| PlanError::TableNotFound(table.clone()))?;
        sizes.insert(table.clone(), size);
    }
    Ok(sizes)
}

/// Step-log line for a filter estimate
pub(crate) fn filter_log_line(filter: &ScalarFilter, est: &CostEstimate, output: usize) -> String {
    format!(
        "  Filter {}.{} (Cost: {:.6}, Selectivity: {:.6}, Output size: {})",
        filter.table, filter.column, est.cost, est.selectivity, output
    )
}

/// Step-log line for a join estimate
pub(crate) fn join_log_line(join: &ColumnPair, est: &CostEstimate, output: usize) -> String {
    format!(
        "  Join {}.{} = {}.{} (Cost: {:.6}, Selectivity: {:.6}, Output size: {})",
        join.left_table, join.left_column, join.right_table, join.right_column, est.cost,
        est.selectivity, output
    )
}

/// Emit every scalar filter in input order, updating the size map
///
/// Returns the accumulated filter cost. Filter cost is computed against
/// the base table size; the output size applies the selectivity to the
/// current size estimate.
pub(crate) fn apply_filter_phase(
    schema: &Schema,
    query: &QuerySpec,
    sizes: &mut SizeMap,
    steps: &mut Vec<Component>,
    log: &mut Vec<String>,
) -> PlanResult<f64> {
    let mut total = 0.0;
    log.push("Estimating filter costs:".to_string());
    for filter in &query.scalar_filters {
        let est = cost::filter_estimate(schema, filter)?;
        total += est.cost;

        let current = sizes.get(&filter.table).copied().unwrap_or(0);
        let output = (current as f64 * est.selectivity) as usize;
        sizes.insert(filter.table.clone(), output);

        log.push(filter_log_line(filter, &est, output));
        steps.push(Component::Filter(filter.clone()));
    }
    Ok(total)
}

/// Emit the given joins in order, updating the size map
///
/// After each join, both operand slots take the estimated output size.
/// Returns the accumulated join cost.
pub(crate) fn apply_join_phase(
    joins: &[ColumnPair],
    sizes: &mut SizeMap,
    steps: &mut Vec<Component>,
    log: &mut Vec<String>,
) -> f64 {
    let mut total = 0.0;
    for join in joins {
        let left = sizes.get(&join.left_table).copied().unwrap_or(0);
        let right = sizes.get(&join.right_table).copied().unwrap_or(0);
        let est = cost::join_estimate(left, right);
        total += est.cost;

        let output = cost::join_output_size(left, right);
        sizes.insert(join.left_table.clone(), output);
        sizes.insert(join.right_table.clone(), output);

        log.push(join_log_line(join, &est, output));
        steps.push(Component::Join(join.clone()));
    }
    total
}

/// Smallest-size table among `candidates`, ties broken by input order
pub(crate) fn smallest_table<'a, I>(candidates: I, sizes: &SizeMap) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut best: Option<(&'a str, usize)> = None;
    for table in candidates {
        let size = sizes.get(table).copied().unwrap_or(0);
        if best.map_or(true, |(_, s)| size < s) {
            best = Some((table.as_str(), size));
        }
    }
    best.map(|(name, _)| name)
}
