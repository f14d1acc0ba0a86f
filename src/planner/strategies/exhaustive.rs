//! All-permutations strategy
//!
//! Emits scalar filters first, then simulates the size and cost
//! evolution of every permutation of the join list and emits the
//! cheapest one. Ties keep the first permutation encountered. Factorial
//! in the join count, so only usable for small queries.

use itertools::Itertools;

use crate::catalog::Schema;
use crate::query::QuerySpec;

use super::super::cost;
use super::super::error::PlanResult;
use super::super::plan::{Component, Plan, Strategy};
use super::{apply_filter_phase, init_sizes, join_log_line};

/// Generate the best-of-all-join-orders plan
pub fn generate(schema: &Schema, query: &QuerySpec) -> PlanResult<Plan> {
    let mut sizes = init_sizes(schema, query)?;
    let mut steps = Vec::new();
    let mut log = vec!["Estimating costs for optimal-join-order strategy:".to_string()];

    let mut total_cost = apply_filter_phase(schema, query, &mut sizes, &mut steps, &mut log)?;

    log.push("Trying all possible join orders:".to_string());

    let mut best_cost = if query.joins.is_empty() {
        0.0
    } else {
        f64::INFINITY
    };
    let mut best_order: Vec<usize> = Vec::new();
    let mut best_lines: Vec<String> = Vec::new();

    for order in (0..query.joins.len()).permutations(query.joins.len()) {
        let mut current_cost = 0.0;
        let mut current_lines = Vec::new();
        let mut current_sizes = sizes.clone();

        for &index in &order {
            let join = &query.joins[index];
            let left = current_sizes.get(&join.left_table).copied().unwrap_or(0);
            let right = current_sizes.get(&join.right_table).copied().unwrap_or(0);
            let est = cost::join_estimate(left, right);
            current_cost += est.cost;

            let output = cost::join_output_size(left, right);
            current_sizes.insert(join.left_table.clone(), output);
            current_sizes.insert(join.right_table.clone(), output);

            current_lines.push(join_log_line(join, &est, output));
        }

        if current_cost < best_cost {
            best_cost = current_cost;
            best_order = order;
            best_lines = current_lines;
        }
    }

    log.push(format!(
        "Best join order found all permutations (Cost: {:.6}):",
        best_cost
    ));
    log.extend(best_lines);

    for index in best_order {
        steps.push(Component::Join(query.joins[index].clone()));
    }
    total_cost += best_cost;

    Ok(Plan::new(Strategy::AllPermutations, steps, log, total_cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::strategies::filters_first;
    use crate::planner::test_fixtures::{sample_query, sample_schema};

    #[test]
    fn test_emits_every_join_exactly_once() {
        let schema = sample_schema();
        let query = sample_query();
        let plan = generate(&schema, &query).unwrap();

        let joins: Vec<_> = plan
            .steps
            .iter()
            .filter_map(|s| match s {
                Component::Join(j) => Some(j.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(joins.len(), query.joins.len());
        for join in &query.joins {
            assert!(joins.contains(join));
        }
    }

    #[test]
    fn test_never_worse_than_input_order() {
        let schema = sample_schema();
        let query = sample_query();
        let best = generate(&schema, &query).unwrap();
        let input_order = filters_first::generate(&schema, &query).unwrap();
        assert!(best.total_cost <= input_order.total_cost);
    }

    #[test]
    fn test_empty_join_list_degrades_to_filters() {
        let schema = sample_schema();
        let mut query = sample_query();
        query.joins.clear();
        let plan = generate(&schema, &query).unwrap();
        assert_eq!(plan.steps.len(), query.scalar_filters.len());
        assert!(plan.total_cost.is_finite());
    }

    #[test]
    fn test_two_runs_identical() {
        let schema = sample_schema();
        let query = sample_query();
        let a = generate(&schema, &query).unwrap();
        let b = generate(&schema, &query).unwrap();
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.total_cost, b.total_cost);
    }
}
