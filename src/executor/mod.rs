//! Query executor
//!
//! Consumes a plan's component list in emitted order, materialising an
//! intermediate table per step. A map from base-table name to the
//! current table tracks progress: a filter replaces one slot, a join
//! binds the shared joined table to both slots, so later components on
//! either base name observe the joined result.

pub mod error;
pub mod filter;
pub mod join;

pub use error::{ExecError, ExecResult};

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{Schema, Table};
use crate::planner::Component;

/// Executes one query's component list against a schema
pub struct Executor<'a> {
    schema: &'a Schema,
    /// Base-table name to the current (possibly intermediate) table
    table_map: HashMap<String, Arc<Table>>,
}

impl<'a> Executor<'a> {
    /// Create an executor with an empty table map
    pub fn new(schema: &'a Schema) -> Self {
        Executor {
            schema,
            table_map: HashMap::new(),
        }
    }

    /// Execute the components in order and return the resulting table
    ///
    /// Returns `None` for an empty component list. Otherwise the result
    /// is the table bound by the last component: for a connected query
    /// that is the fully joined and filtered table.
    pub fn execute(&mut self, components: &[Component]) -> ExecResult<Option<Arc<Table>>> {
        self.table_map.clear();
        let mut result_slot: Option<String> = None;

        for component in components {
            match component {
                Component::Filter(filter) => {
                    result_slot = Some(filter.table.clone());
                    let current = self.slot(&filter.table)?;
                    let filtered = filter::apply_filter(&current, filter)?;
                    info!(
                        table = %filter.table,
                        column = %filter.column,
                        rows = filtered.len(),
                        "applied filter"
                    );
                    self.table_map
                        .insert(filter.table.clone(), Arc::new(filtered));
                }
                Component::Join(join) => {
                    result_slot = Some(join.left_table.clone());
                    let left = self.slot(&join.left_table)?;
                    let right = self.slot(&join.right_table)?;
                    let joined = Arc::new(join::join_tables(&left, &right, join)?);
                    info!(
                        left = %join.left_table,
                        right = %join.right_table,
                        rows = joined.len(),
                        "joined tables"
                    );
                    self.table_map
                        .insert(join.left_table.clone(), Arc::clone(&joined));
                    self.table_map.insert(join.right_table.clone(), joined);
                }
            }
        }

        match result_slot {
            Some(name) => {
                let result = self.table_map.get(&name).cloned().ok_or_else(|| {
                    ExecError::Internal(format!("result slot '{}' vanished", name))
                })?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    /// Current table for a base-table slot, lazily loaded from the schema
    fn slot(&mut self, name: &str) -> ExecResult<Arc<Table>> {
        if let Some(table) = self.table_map.get(name) {
            return Ok(Arc::clone(table));
        }
        let table = self
            .schema
            .table(name)
            .ok_or_else(|| ExecError::TableNotFound(name.to_string()))?;
        let table = Arc::clone(table);
        self.table_map.insert(name.to_string(), Arc::clone(&table));
        Ok(table)
    }
}
