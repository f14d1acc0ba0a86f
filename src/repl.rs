//! Interactive workbench loop
//!
//! Reads one query block at a time, plans it five ways, prints every
//! plan, then executes every plan and reports wall-clock timings. Errors
//! abort only the query that raised them.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::error;

use crate::catalog::Schema;
use crate::executor::Executor;
use crate::output;
use crate::planner::{best_plan, Plan, Planner};
use crate::query::parse_query_block;

/// The interactive workbench
pub struct Repl<'a> {
    schema: &'a Schema,
    output_dir: PathBuf,
}

impl<'a> Repl<'a> {
    /// Create a workbench over a loaded schema
    pub fn new(schema: &'a Schema, output_dir: PathBuf) -> Self {
        Repl { schema, output_dir }
    }

    /// Run until `quit` or end of input
    pub fn run(&self, input: &mut impl BufRead, out: &mut impl Write) -> std::io::Result<()> {
        loop {
            writeln!(out, "\nEnter your query (type 'quit' alone on a line to exit):")?;
            out.flush()?;

            let mut lines = Vec::new();
            let mut quit = false;
            loop {
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    quit = true;
                    break;
                }
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if line.trim() == "quit" {
                    quit = true;
                    break;
                }
                let done = line.contains("query_end");
                lines.push(line);
                if done {
                    break;
                }
            }

            if !lines.is_empty() {
                if let Err(e) = self.process_query(&lines, out) {
                    writeln!(out, "Error processing query: {}", e)?;
                    error!(error = %e, "query failed");
                }
            }

            if quit {
                break;
            }
        }
        Ok(())
    }

    /// Parse, validate, plan, print and execute one query block
    fn process_query(
        &self,
        lines: &[String],
        out: &mut impl Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let query = parse_query_block(lines, self.schema)?;

        writeln!(out, "\n=== Query Components ===")?;
        write!(out, "{}", query)?;
        writeln!(out, "=====================")?;

        writeln!(out, "\nGenerating query plans...")?;
        let plans = Planner::new(self.schema, &query).generate_plans()?;

        writeln!(out, "\n=== Plan Generation Summary ===")?;
        for plan in &plans {
            writeln!(out)?;
            write!(out, "{}", plan)?;
        }
        writeln!(out, "===========================")?;

        if let Some(best) = best_plan(&plans) {
            writeln!(out, "\nBest Plan Selected: {}", best.strategy)?;
            writeln!(out, "Estimated Cost: {:.6}", best.total_cost)?;
            write!(out, "{}", best.render_execution_order())?;
        }

        writeln!(out, "\n=== Executing All Plans ===")?;
        let mut timings: Vec<(&Plan, f64)> = Vec::with_capacity(plans.len());
        for plan in &plans {
            writeln!(out, "\nExecuting {} Plan:", plan.strategy)?;

            let started = Instant::now();
            let mut executor = Executor::new(self.schema);
            let result = executor.execute(&plan.steps)?;
            let elapsed = started.elapsed().as_secs_f64() * 1000.0;
            timings.push((plan, elapsed));

            match result {
                Some(table) => {
                    writeln!(
                        out,
                        "Query execution completed. Found {} rows.",
                        table.len()
                    )?;
                    let path = output::write_results(&table, &self.output_dir)?;
                    writeln!(out, "Results have been written to {}", path.display())?;
                }
                None => writeln!(out, "Plan has no components; nothing to execute.")?,
            }
        }

        writeln!(out, "\n=== Execution Time Summary ===")?;
        for (plan, elapsed) in &timings {
            writeln!(out, "{} Plan: {:.3} ms", plan.strategy, elapsed)?;
        }

        Ok(())
    }
}
