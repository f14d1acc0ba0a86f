//! Scalar filter step
//!
//! Materialises a new table holding exactly the rows of the input that
//! satisfy `column op literal`. The column list is copied unchanged so
//! base-table provenance survives; integer histograms are rebuilt on the
//! result.

use crate::catalog::{Column, Table};
use crate::query::ScalarFilter;

use super::error::{ExecError, ExecResult};

/// Apply a scalar filter to one table, producing a new table
pub fn apply_filter(table: &Table, filter: &ScalarFilter) -> ExecResult<Table> {
    let index = table
        .column_index(&filter.column, &filter.table)
        .ok_or_else(|| ExecError::ColumnNotFound {
            table: filter.table.clone(),
            column: filter.column.clone(),
        })?;

    // Columns keep their name, base table and kind; histograms start
    // empty and fill as rows are accepted
    let mut filtered = Table::new(format!("{}_filtered", table.name));
    for column in table.columns() {
        filtered.add_column(Column::new(
            column.name.clone(),
            column.base_table.clone(),
            column.kind,
        ));
    }

    for row in table.rows() {
        let field = row.get(index).ok_or_else(|| {
            ExecError::Internal(format!(
                "row shorter than column list in table '{}'",
                table.name
            ))
        })?;
        let matches =
            field
                .satisfies(filter.op, &filter.value)
                .map_err(|source| ExecError::KindMismatch {
                    context: format!("filter {}", filter),
                    source,
                })?;
        if matches {
            filtered.add_row(row.clone())?;
        }
    }

    filtered.rebuild_int_histograms();
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Column, CompareOp, Field, FieldKind, Row};

    fn movie_table() -> Table {
        let mut table = Table::new("movie");
        table.add_column(Column::new("id", "movie", FieldKind::Integer));
        table.add_column(Column::new("year", "movie", FieldKind::Integer));
        for (id, year) in [(1, 1994), (2, 2008), (3, 2010), (4, 1999)] {
            table
                .add_row(Row::new(vec![Field::Int(id), Field::Int(year)]))
                .unwrap();
        }
        table
    }

    fn filter(op: CompareOp, year: i64) -> ScalarFilter {
        ScalarFilter {
            table: "movie".to_string(),
            column: "year".to_string(),
            op,
            value: Field::Int(year),
        }
    }

    #[test]
    fn test_filter_keeps_matching_rows() {
        let table = movie_table();
        let result = apply_filter(&table, &filter(CompareOp::Gt, 2000)).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.name, "movie_filtered");
        assert_eq!(result.columns().len(), 2);
    }

    #[test]
    fn test_filter_all_operators() {
        let table = movie_table();
        assert_eq!(apply_filter(&table, &filter(CompareOp::Eq, 1999)).unwrap().len(), 1);
        assert_eq!(apply_filter(&table, &filter(CompareOp::Ne, 1999)).unwrap().len(), 3);
        assert_eq!(apply_filter(&table, &filter(CompareOp::Lt, 2008)).unwrap().len(), 2);
        assert_eq!(apply_filter(&table, &filter(CompareOp::Le, 2008)).unwrap().len(), 3);
        assert_eq!(apply_filter(&table, &filter(CompareOp::Ge, 2008)).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_unknown_column() {
        let table = movie_table();
        let bad = ScalarFilter {
            table: "movie".to_string(),
            column: "runtime".to_string(),
            op: CompareOp::Eq,
            value: Field::Int(90),
        };
        assert!(matches!(
            apply_filter(&table, &bad),
            Err(ExecError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_filter_kind_mismatch() {
        let table = movie_table();
        let bad = ScalarFilter {
            table: "movie".to_string(),
            column: "year".to_string(),
            op: CompareOp::Eq,
            value: Field::from("2008"),
        };
        assert!(matches!(
            apply_filter(&table, &bad),
            Err(ExecError::KindMismatch { .. })
        ));
    }

    #[test]
    fn test_filter_rebuilds_histograms() {
        use crate::catalog::ColumnHistogram;

        let table = movie_table();
        let result = apply_filter(&table, &filter(CompareOp::Gt, 2000)).unwrap();
        match result.columns()[1].histogram() {
            ColumnHistogram::Int(hist) => {
                assert_eq!(hist.total_values(), 2);
                assert_eq!(hist.min_val(), 2008);
                assert_eq!(hist.max_val(), 2010);
            }
            _ => panic!("expected integer histogram"),
        }
    }
}
