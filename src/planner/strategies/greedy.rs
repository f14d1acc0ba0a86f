//! Greedy strategy
//!
//! Emits scalar filters first, seeds the joined set with the smallest
//! filtered table, then repeatedly appends the cheapest join that
//! connects a joined table to an unjoined one. A disconnected query adds
//! the smallest unjoined table and continues; a join whose tables are
//! already both joined can never be placed and fails the plan.

use std::collections::HashSet;

use crate::catalog::Schema;
use crate::query::QuerySpec;

use super::super::cost;
use super::super::error::{PlanError, PlanResult};
use super::super::plan::{Component, Plan, Strategy};
use super::{apply_filter_phase, init_sizes, join_log_line, smallest_table};

/// Generate the greedy-join plan
pub fn generate(schema: &Schema, query: &QuerySpec) -> PlanResult<Plan> {
    let mut sizes = init_sizes(schema, query)?;
    let mut steps = Vec::new();
    let mut log = vec!["Estimating costs for greedy join strategy:".to_string()];

    let mut total_cost = apply_filter_phase(schema, query, &mut sizes, &mut steps, &mut log)?;

    log.push("Estimating join costs (greedy strategy):".to_string());

    if !query.joins.is_empty() {
        let mut remaining: Vec<usize> = (0..query.joins.len()).collect();
        let mut joined: HashSet<&str> = HashSet::new();

        if let Some(seed) = smallest_table(&query.tables, &sizes) {
            joined.insert(seed);
        }

        while !remaining.is_empty() {
            let best = find_best_next_join(query, &remaining, &joined, &sizes);

            match best {
                Some(position) => {
                    let index = remaining[position];
                    let join = &query.joins[index];

                    let left = sizes.get(&join.left_table).copied().unwrap_or(0);
                    let right = sizes.get(&join.right_table).copied().unwrap_or(0);
                    let est = cost::join_estimate(left, right);
                    total_cost += est.cost;

                    let output = cost::join_output_size(left, right);
                    sizes.insert(join.left_table.clone(), output);
                    sizes.insert(join.right_table.clone(), output);

                    log.push(join_log_line(join, &est, output));
                    steps.push(Component::Join(join.clone()));

                    joined.insert(join.left_table.as_str());
                    joined.insert(join.right_table.as_str());
                    remaining.remove(position);
                }
                None => {
                    // Disconnected: pull in the smallest unjoined table
                    let unjoined = query.tables.iter().filter(|t| !joined.contains(t.as_str()));
                    match smallest_table(unjoined, &sizes) {
                        Some(table) => {
                            joined.insert(table);
                        }
                        None => {
                            // Every table is joined but joins remain: a
                            // cycle-closing edge the greedy rule cannot place
                            let join = &query.joins[remaining[0]];
                            return Err(PlanError::NoApplicableJoin(join.to_string()));
                        }
                    }
                }
            }
        }
    }

    Ok(Plan::new(Strategy::Greedy, steps, log, total_cost))
}

/// Cheapest remaining join connecting the joined set to an unjoined
/// table; ties keep the earliest
fn find_best_next_join(
    query: &QuerySpec,
    remaining: &[usize],
    joined: &HashSet<&str>,
    sizes: &super::SizeMap,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, &index) in remaining.iter().enumerate() {
        let join = &query.joins[index];
        let left_joined = joined.contains(join.left_table.as_str());
        let right_joined = joined.contains(join.right_table.as_str());
        if left_joined == right_joined {
            continue;
        }

        let left = sizes.get(&join.left_table).copied().unwrap_or(0);
        let right = sizes.get(&join.right_table).copied().unwrap_or(0);
        let est = cost::join_estimate(left, right);
        if best.map_or(true, |(_, cost)| est.cost < cost) {
            best = Some((position, est.cost));
        }
    }
    best.map(|(position, _)| position)
}
