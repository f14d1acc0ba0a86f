//! Query planner
//!
//! Generates five alternative plans for one validated query, each an
//! ordered list of executable components plus a cost estimate:
//!
//! ```text
//! QuerySpec
//!   → Planner::generate_plans() → Vec<Plan>   (all five strategies, timed)
//!   → best_plan() → &Plan                     (minimum estimated cost)
//! ```
//!
//! All strategies share the cost primitives in [`cost`]; they differ only
//! in the order they emit joins. Plan timings are informational and never
//! affect plan choice.

pub mod cost;
pub mod error;
pub mod plan;
pub mod strategies;

pub use error::{PlanError, PlanResult};
pub use plan::{Component, Plan, Strategy};
pub use strategies::dp::MAX_RELATIONS;

use std::time::Instant;

use crate::catalog::Schema;
use crate::query::QuerySpec;

/// Generates every strategy's plan for one query
pub struct Planner<'a> {
    schema: &'a Schema,
    query: &'a QuerySpec,
}

impl<'a> Planner<'a> {
    /// Create a planner for a validated query
    pub fn new(schema: &'a Schema, query: &'a QuerySpec) -> Self {
        Planner { schema, query }
    }

    /// Generate all five plans, timing each generation independently
    pub fn generate_plans(&self) -> PlanResult<Vec<Plan>> {
        let mut plans = Vec::with_capacity(Strategy::ALL.len());
        for strategy in Strategy::ALL {
            let start = Instant::now();
            let mut plan = self.generate(strategy)?;
            plan.generation_time = start.elapsed();
            plans.push(plan);
        }
        Ok(plans)
    }

    fn generate(&self, strategy: Strategy) -> PlanResult<Plan> {
        match strategy {
            Strategy::JoinsFirst => strategies::joins_first::generate(self.schema, self.query),
            Strategy::FiltersFirst => strategies::filters_first::generate(self.schema, self.query),
            Strategy::AllPermutations => strategies::exhaustive::generate(self.schema, self.query),
            Strategy::Greedy => strategies::greedy::generate(self.schema, self.query),
            Strategy::DynamicProgramming => strategies::dp::generate(self.schema, self.query),
        }
    }
}

/// The minimum-cost plan; ties keep the earliest generated
pub fn best_plan(plans: &[Plan]) -> Option<&Plan> {
    let mut best: Option<&Plan> = None;
    for plan in plans {
        match best {
            Some(current) if plan.total_cost >= current.total_cost => {}
            _ => best = Some(plan),
        }
    }
    best
}
