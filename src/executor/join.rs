//! Join step
//!
//! Inner nested-loop equi-join: the output columns are the left table's
//! columns followed by the right table's, and the output rows are every
//! pair agreeing on the join columns. Integer histograms are rebuilt on
//! the result.

use crate::catalog::{Column, Table};
use crate::query::ColumnPair;

use super::error::{ExecError, ExecResult};

/// Join two tables on column equality, producing a new table
pub fn join_tables(left: &Table, right: &Table, join: &ColumnPair) -> ExecResult<Table> {
    let left_index = left
        .column_index(&join.left_column, &join.left_table)
        .ok_or_else(|| ExecError::ColumnNotFound {
            table: join.left_table.clone(),
            column: join.left_column.clone(),
        })?;
    let right_index = right
        .column_index(&join.right_column, &join.right_table)
        .ok_or_else(|| ExecError::ColumnNotFound {
            table: join.right_table.clone(),
            column: join.right_column.clone(),
        })?;

    let mut joined = Table::new(format!("{}_{}_joined", left.name, right.name));
    for column in left.columns().iter().chain(right.columns()) {
        joined.add_column(Column::new(
            column.name.clone(),
            column.base_table.clone(),
            column.kind,
        ));
    }

    for left_row in left.rows() {
        let left_key = left_row.get(left_index).ok_or_else(|| {
            ExecError::Internal(format!(
                "row shorter than column list in table '{}'",
                left.name
            ))
        })?;
        for right_row in right.rows() {
            let right_key = right_row.get(right_index).ok_or_else(|| {
                ExecError::Internal(format!(
                    "row shorter than column list in table '{}'",
                    right.name
                ))
            })?;
            let matches = left_key.try_cmp(right_key).map_err(|source| {
                ExecError::KindMismatch {
                    context: format!("join {}", join),
                    source,
                }
            })? == std::cmp::Ordering::Equal;
            if matches {
                joined.add_row(crate::catalog::Row::concat(left_row, right_row))?;
            }
        }
    }

    joined.rebuild_int_histograms();
    Ok(joined)
}
