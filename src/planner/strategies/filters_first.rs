//! Filters-first strategy
//!
//! Emits every scalar filter in input order, then every join in input
//! order. Joins then price against the filter-narrowed sizes.

use crate::catalog::Schema;
use crate::query::QuerySpec;

use super::super::error::PlanResult;
use super::super::plan::{Plan, Strategy};
use super::{apply_filter_phase, apply_join_phase, init_sizes};

/// Generate the filters-first plan
pub fn generate(schema: &Schema, query: &QuerySpec) -> PlanResult<Plan> {
    let mut sizes = init_sizes(schema, query)?;
    let mut steps = Vec::new();
    let mut log = vec!["Estimating costs for filters-first strategy:".to_string()];

    let mut total_cost = apply_filter_phase(schema, query, &mut sizes, &mut steps, &mut log)?;

    log.push("Estimating join costs:".to_string());
    total_cost += apply_join_phase(&query.joins, &mut sizes, &mut steps, &mut log);

    Ok(Plan::new(Strategy::FiltersFirst, steps, log, total_cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan::Component;
    use crate::planner::strategies::joins_first;
    use crate::planner::test_fixtures::{sample_query, sample_schema};

    #[test]
    fn test_filters_precede_joins() {
        let schema = sample_schema();
        let query = sample_query();
        let plan = generate(&schema, &query).unwrap();

        let filter_count = query.scalar_filters.len();
        for step in &plan.steps[..filter_count] {
            assert!(matches!(step, Component::Filter(_)));
        }
        for step in &plan.steps[filter_count..] {
            assert!(matches!(step, Component::Join(_)));
        }
    }

    #[test]
    fn test_cheaper_than_joins_first_on_selective_filters() {
        let schema = sample_schema();
        let query = sample_query();
        let filters_first = generate(&schema, &query).unwrap();
        let joins_first = joins_first::generate(&schema, &query).unwrap();
        assert!(filters_first.total_cost < joins_first.total_cost);
    }

    #[test]
    fn test_no_filters_no_joins_costs_zero() {
        let schema = sample_schema();
        let mut query = sample_query();
        query.scalar_filters.clear();
        query.joins.clear();
        let plan = generate(&schema, &query).unwrap();
        assert!(plan.steps.is_empty());
        assert_eq!(plan.total_cost, 0.0);
    }
}
