//! Plan types - components, strategies and generated plans

use std::fmt;
use std::time::Duration;

use crate::query::{ColumnPair, ScalarFilter};

/// A single executable operator in a plan
///
/// The executor consumes these verbatim, in emitted order.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Scalar filter on one base-table slot
    Filter(ScalarFilter),
    /// Inner equi-join between two base-table slots
    Join(ColumnPair),
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Filter(filter) => write!(f, "Filter: {}", filter),
            Component::Join(join) => write!(f, "Join: {}", join),
        }
    }
}

/// Join-ordering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    JoinsFirst,
    FiltersFirst,
    AllPermutations,
    Greedy,
    DynamicProgramming,
}

impl Strategy {
    /// All strategies, in generation and reporting order
    pub const ALL: [Strategy; 5] = [
        Strategy::JoinsFirst,
        Strategy::FiltersFirst,
        Strategy::AllPermutations,
        Strategy::Greedy,
        Strategy::DynamicProgramming,
    ];

    /// Short identifier used in summaries
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::JoinsFirst => "JoinsFirst",
            Strategy::FiltersFirst => "FiltersFirst",
            Strategy::AllPermutations => "AllPermutations",
            Strategy::Greedy => "Greedy",
            Strategy::DynamicProgramming => "DynamicProgramming",
        }
    }

    /// Heading used when printing the full plan
    pub fn title(&self) -> &'static str {
        match self {
            Strategy::JoinsFirst => "Joins First Plan",
            Strategy::FiltersFirst => "Filters First Plan",
            Strategy::AllPermutations => "All Permutations Plan",
            Strategy::Greedy => "Greedy Join Plan",
            Strategy::DynamicProgramming => "Dynamic Programming Join Plan",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A generated plan: ordered components plus its cost estimate
#[derive(Debug, Clone)]
pub struct Plan {
    /// The strategy that produced this plan
    pub strategy: Strategy,
    /// Components in execution order
    pub steps: Vec<Component>,
    /// Human-readable step log (operator, cost, selectivity, output size)
    pub log: Vec<String>,
    /// Total estimated cost
    pub total_cost: f64,
    /// Wall-clock time spent generating the plan
    pub generation_time: Duration,
}

impl Plan {
    /// Create a plan; the planner fills in the generation time
    pub fn new(strategy: Strategy, steps: Vec<Component>, log: Vec<String>, total_cost: f64) -> Self {
        Plan {
            strategy,
            steps,
            log,
            total_cost,
            generation_time: Duration::ZERO,
        }
    }

    /// Render the execution order of the plan's components
    pub fn render_execution_order(&self) -> String {
        let mut out = String::from("Execution Order of Components:\n");
        for step in &self.steps {
            out.push_str(&format!("  {}\n", step));
        }
        out
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.strategy.title())?;
        for line in &self.log {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "Total Estimated Cost: {:.6}", self.total_cost)?;
        writeln!(
            f,
            "Generation Time: {:.3} ms",
            self.generation_time.as_secs_f64() * 1000.0
        )
    }
}
