//! Table type - named ordered rows with a fixed column schema

use crate::stats::{IntHistogram, StatsError, StatsResult};

use super::column::{Column, ColumnHistogram};
use super::field::{CompareOp, Field, FieldKind};
use super::row::Row;
use super::{CatalogError, CatalogResult};

/// A named ordered sequence of rows with a fixed column schema
///
/// Every row's length and per-position kinds match the column list.
/// After a join, column names may repeat; the pair
/// `(column_name, base_table_name)` stays unique.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Ordered column schema
    columns: Vec<Column>,
    /// Ordered rows
    data: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Table {
            name: name.into(),
            columns: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append a column to the schema
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// The column schema
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows
    pub fn rows(&self) -> &[Row] {
        &self.data
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a row, enforcing arity and per-position kind match
    ///
    /// Accepted rows also feed each column's histogram.
    pub fn add_row(&mut self, row: Row) -> CatalogResult<()> {
        if row.len() != self.columns.len() {
            return Err(CatalogError::RowArityMismatch {
                table: self.name.clone(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        for (column, field) in self.columns.iter().zip(row.iter()) {
            if field.kind() != column.kind {
                return Err(CatalogError::RowKindMismatch {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    expected: column.kind,
                    got: field.kind(),
                });
            }
        }
        for (column, field) in self.columns.iter_mut().zip(row.iter()) {
            column.observe(field);
        }
        self.data.push(row);
        Ok(())
    }

    /// Index of the column `(name, base_table)`, None if absent
    ///
    /// This is the only lookup joined tables support; by-name lookup is
    /// ambiguous once two base tables contribute a column of the same name.
    pub fn column_index(&self, name: &str, base_table: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name && c.base_table == base_table)
    }

    /// Find a column by name alone (base tables only)
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Rebuild every integer column's histogram with fresh min/max
    /// taken from the current data
    pub fn rebuild_int_histograms(&mut self) {
        for index in 0..self.columns.len() {
            if self.columns[index].kind != FieldKind::Integer {
                continue;
            }
            let mut min_val = i64::MAX;
            let mut max_val = i64::MIN;
            for row in &self.data {
                if let Some(Field::Int(v)) = row.get(index) {
                    min_val = min_val.min(*v);
                    max_val = max_val.max(*v);
                }
            }
            if min_val > max_val {
                let (lo, hi) = IntHistogram::DEFAULT_RANGE;
                min_val = lo;
                max_val = hi;
            }
            self.columns[index].reset_int_histogram(
                IntHistogram::DEFAULT_BUCKETS,
                min_val,
                max_val,
            );
            for row_index in 0..self.data.len() {
                if let Some(Field::Int(v)) = self.data[row_index].get(index) {
                    let v = *v;
                    self.columns[index].observe(&Field::Int(v));
                }
            }
        }
    }

    /// Estimated fraction of rows satisfying `column op value`, in [0, 1]
    ///
    /// `>=`, `<=` and `!=` are approximated by `>`, `<` and `=`; the
    /// histograms only track the latter.
    pub fn estimate_selectivity(
        &self,
        column: &str,
        op: CompareOp,
        value: &Field,
    ) -> StatsResult<f64> {
        let col = self
            .column_by_name(column)
            .ok_or_else(|| StatsError::ColumnNotFound(column.to_string()))?;
        if value.kind() != col.kind {
            return Err(StatsError::KindMismatch {
                column: column.to_string(),
                expected: col.kind,
                got: value.kind(),
            });
        }
        let op = match op {
            CompareOp::Ge => CompareOp::Gt,
            CompareOp::Le => CompareOp::Lt,
            CompareOp::Ne => CompareOp::Eq,
            other => other,
        };
        match (col.histogram(), value) {
            (ColumnHistogram::Int(hist), Field::Int(v)) => hist.selectivity(op, *v),
            (ColumnHistogram::Str(hist), Field::Str(s)) => hist.selectivity(op, s),
            _ => Err(StatsError::KindMismatch {
                column: column.to_string(),
                expected: col.kind,
                got: value.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_table() -> Table {
        let mut table = Table::new("movie");
        table.add_column(Column::new("id", "movie", FieldKind::Integer));
        table.add_column(Column::new("title", "movie", FieldKind::String));
        table.add_column(Column::new("year", "movie", FieldKind::Integer));
        table
    }

    #[test]
    fn test_add_row_validates_arity() {
        let mut table = movie_table();
        let err = table.add_row(Row::new(vec![Field::Int(1)])).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::RowArityMismatch {
                expected: 3,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_add_row_validates_kinds() {
        let mut table = movie_table();
        let err = table
            .add_row(Row::new(vec![
                Field::Int(1),
                Field::Int(2),
                Field::Int(1999),
            ]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::RowKindMismatch { .. }));
    }

    #[test]
    fn test_add_row_accepts_matching_row() {
        let mut table = movie_table();
        table
            .add_row(Row::new(vec![
                Field::Int(1),
                Field::from("Inception"),
                Field::Int(2010),
            ]))
            .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_column_index_uses_base_table() {
        let mut table = Table::new("joined");
        table.add_column(Column::new("id", "movie", FieldKind::Integer));
        table.add_column(Column::new("id", "director", FieldKind::Integer));
        assert_eq!(table.column_index("id", "movie"), Some(0));
        assert_eq!(table.column_index("id", "director"), Some(1));
        assert_eq!(table.column_index("id", "actor"), None);
    }

    #[test]
    fn test_rebuild_int_histograms_uses_fresh_range() {
        let mut table = movie_table();
        for (id, year) in [(1, 1990), (2, 2005), (3, 2020)] {
            table
                .add_row(Row::new(vec![
                    Field::Int(id),
                    Field::from("m"),
                    Field::Int(year),
                ]))
                .unwrap();
        }
        table.rebuild_int_histograms();
        match table.columns()[2].histogram() {
            ColumnHistogram::Int(hist) => {
                assert_eq!(hist.min_val(), 1990);
                assert_eq!(hist.max_val(), 2020);
                assert_eq!(hist.total_values(), 3);
            }
            _ => panic!("expected integer histogram"),
        }
    }

    #[test]
    fn test_estimate_selectivity_dispatch() {
        let mut table = movie_table();
        for (id, year) in [(1, 1990), (2, 2005), (3, 2020), (4, 2021)] {
            table
                .add_row(Row::new(vec![
                    Field::Int(id),
                    Field::from("m"),
                    Field::Int(year),
                ]))
                .unwrap();
        }
        table.rebuild_int_histograms();
        let s = table
            .estimate_selectivity("year", CompareOp::Gt, &Field::Int(2000))
            .unwrap();
        assert!(s > 0.0 && s <= 1.0);

        assert!(matches!(
            table.estimate_selectivity("missing", CompareOp::Eq, &Field::Int(0)),
            Err(StatsError::ColumnNotFound(_))
        ));
        assert!(matches!(
            table.estimate_selectivity("year", CompareOp::Eq, &Field::from("x")),
            Err(StatsError::KindMismatch { .. })
        ));
    }
}
