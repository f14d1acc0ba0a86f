//! Dynamic-programming strategy
//!
//! Emits scalar filters first, then finds the cheapest way to join the
//! full table set by building optimal subplans over the power set of
//! tables. Subsets are bitmasks, which caps the planner at 16 relations.
//! Join costs price against the static post-filter sizes, so a DP plan
//! carries n-1 joins (a spanning sequence), not every declared join.

use crate::catalog::Schema;
use crate::query::QuerySpec;

use super::super::cost;
use super::super::error::{PlanError, PlanResult};
use super::super::plan::{Component, Plan, Strategy};
use super::{apply_filter_phase, init_sizes, join_log_line};

/// Largest table count the bitmask DP supports
pub const MAX_RELATIONS: usize = 16;

/// Optimal way to materialise one subset of tables
#[derive(Debug, Clone, Copy)]
struct SubPlan {
    /// Total join cost of this subset
    cost: f64,
    /// How the subset was built: (left subset, right subset, join index)
    build: Option<(u32, u32, usize)>,
}

/// Generate the dynamic-programming plan
pub fn generate(schema: &Schema, query: &QuerySpec) -> PlanResult<Plan> {
    let table_count = query.tables.len();
    if table_count > MAX_RELATIONS {
        return Err(PlanError::TooManyRelations {
            count: table_count,
            max: MAX_RELATIONS,
        });
    }

    let mut sizes = init_sizes(schema, query)?;
    let mut steps = Vec::new();
    let mut log = vec!["Estimating costs for dynamic programming join strategy:".to_string()];

    let mut total_cost = apply_filter_phase(schema, query, &mut sizes, &mut steps, &mut log)?;

    log.push("Estimating join costs (dynamic programming):".to_string());

    // Bit index per table, in query order
    let bit_of = |name: &str| -> Option<u32> {
        query
            .tables
            .iter()
            .position(|t| t == name)
            .map(|i| 1u32 << i)
    };
    let join_bits: Vec<(u32, u32)> = query
        .joins
        .iter()
        .map(|join| {
            let left = bit_of(&join.left_table)
                .ok_or_else(|| PlanError::TableNotFound(join.left_table.clone()))?;
            let right = bit_of(&join.right_table)
                .ok_or_else(|| PlanError::TableNotFound(join.right_table.clone()))?;
            Ok((left, right))
        })
        .collect::<PlanResult<_>>()?;

    let full: u32 = if table_count == 0 {
        0
    } else {
        (1u32 << table_count) - 1
    };
    let mut best: Vec<Option<SubPlan>> = vec![None; (full as usize) + 1];

    // Single tables are free: already filtered
    for i in 0..table_count {
        best[1 << i] = Some(SubPlan {
            cost: 0.0,
            build: None,
        });
    }

    for mask in 1..=full {
        if mask.count_ones() < 2 {
            continue;
        }
        // Every split of `mask` into two non-empty disjoint subsets
        let mut sub = (mask - 1) & mask;
        while sub > 0 {
            let other = mask ^ sub;
            if let (Some(left_plan), Some(right_plan)) = (best[sub as usize], best[other as usize])
            {
                for (index, &(left_bit, right_bit)) in join_bits.iter().enumerate() {
                    let crosses = (sub & left_bit != 0 && other & right_bit != 0)
                        || (sub & right_bit != 0 && other & left_bit != 0);
                    if !crosses {
                        continue;
                    }
                    let join = &query.joins[index];
                    let left = sizes.get(&join.left_table).copied().unwrap_or(0);
                    let right = sizes.get(&join.right_table).copied().unwrap_or(0);
                    let est = cost::join_estimate(left, right);
                    let cost = left_plan.cost + right_plan.cost + est.cost;

                    if best[mask as usize].map_or(true, |p| cost < p.cost) {
                        best[mask as usize] = Some(SubPlan {
                            cost,
                            build: Some((sub, other, index)),
                        });
                    }
                }
            }
            sub = (sub - 1) & mask;
        }
    }

    if table_count >= 2 {
        match best[full as usize] {
            Some(plan) => {
                let mut order = Vec::new();
                reconstruct(&best, full, &mut order);

                log.push("Best join order found:".to_string());
                for &index in &order {
                    let join = &query.joins[index];
                    let left = sizes.get(&join.left_table).copied().unwrap_or(0);
                    let right = sizes.get(&join.right_table).copied().unwrap_or(0);
                    let est = cost::join_estimate(left, right);
                    let output = cost::join_output_size(left, right);
                    log.push(join_log_line(join, &est, output));
                    steps.push(Component::Join(join.clone()));
                }
                total_cost += plan.cost;
            }
            None if query.joins.is_empty() => {
                // Nothing to join; the plan is the filters alone
            }
            None => return Err(PlanError::DisconnectedJoinGraph),
        }
    }

    Ok(Plan::new(
        Strategy::DynamicProgramming,
        steps,
        log,
        total_cost,
    ))
}

/// Rebuild the join sequence for `mask` by backtracking through the
/// subplan table: left subtree first, then right, then the merging join
fn reconstruct(best: &[Option<SubPlan>], mask: u32, order: &mut Vec<usize>) {
    if let Some(SubPlan {
        build: Some((left, right, join)),
        ..
    }) = best[mask as usize]
    {
        reconstruct(best, left, order);
        reconstruct(best, right, order);
        order.push(join);
    }
}
