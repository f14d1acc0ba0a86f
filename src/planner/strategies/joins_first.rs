//! Joins-first strategy
//!
//! Emits every join in input order, then every scalar filter in input
//! order. Because the size map is updated during the join phase, the
//! filter output sizes quoted in the log are computed against post-join
//! sizes even though the filters physically run last.

use crate::catalog::Schema;
use crate::query::QuerySpec;

use super::super::error::PlanResult;
use super::super::plan::{Plan, Strategy};
use super::{apply_filter_phase, apply_join_phase, init_sizes};

/// Generate the joins-first plan
pub fn generate(schema: &Schema, query: &QuerySpec) -> PlanResult<Plan> {
    let mut sizes = init_sizes(schema, query)?;
    let mut steps = Vec::new();
    let mut log = vec!["Estimating costs for joins-first strategy:".to_string()];

    log.push("Estimating join costs:".to_string());
    let mut total_cost = apply_join_phase(&query.joins, &mut sizes, &mut steps, &mut log);

    total_cost += apply_filter_phase(schema, query, &mut sizes, &mut steps, &mut log)?;

    Ok(Plan::new(Strategy::JoinsFirst, steps, log, total_cost))
}
