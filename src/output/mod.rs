//! Result writer
//!
//! Writes the final rows of a query to `results.txt` as fixed-width
//! columns headed `base_table.column`, capped at 1,000 rows.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::catalog::Table;

/// Width of every output column
pub const COLUMN_WIDTH: usize = 20;

/// Maximum rows written before truncation
pub const MAX_ROWS: usize = 1000;

/// Write a table to `<output_dir>/results.txt`, creating the directory
/// on demand and overwriting any previous result
pub fn write_results(table: &Table, output_dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join("results.txt");
    let mut out = BufWriter::new(fs::File::create(&path)?);

    writeln!(out, "Query Result")?;
    writeln!(out, "============")?;
    writeln!(out, "Total Rows: {}", table.len())?;
    writeln!(out)?;

    for column in table.columns() {
        let header = format!("{}.{}", column.base_table, column.name);
        write!(out, "{:<width$}", header, width = COLUMN_WIDTH)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(COLUMN_WIDTH * table.columns().len()))?;

    for row in table.rows().iter().take(MAX_ROWS) {
        for field in row {
            write!(out, "{:<width$}", field.to_string(), width = COLUMN_WIDTH)?;
        }
        writeln!(out)?;
    }

    if table.len() > MAX_ROWS {
        writeln!(out)?;
        writeln!(out, "... and {} more rows", table.len() - MAX_ROWS)?;
    }

    out.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Column, Field, FieldKind, Row};

    fn small_table() -> Table {
        let mut table = Table::new("movie");
        table.add_column(Column::new("id", "movie", FieldKind::Integer));
        table.add_column(Column::new("title", "movie", FieldKind::String));
        for (id, title) in [(1, "Inception"), (2, "Memento")] {
            table
                .add_row(Row::new(vec![Field::Int(id), Field::from(title)]))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_write_results_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_results(&small_table(), dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();

        assert!(text.contains("Total Rows: 2"));
        assert!(text.contains("movie.id"));
        assert!(text.contains("movie.title"));
        assert!(text.contains("Inception"));
        assert!(!text.contains("more rows"));

        // Header fields are padded to the fixed width
        let header_line = text.lines().nth(4).unwrap();
        assert!(header_line.starts_with(&format!("{:<20}", "movie.id")));
    }

    #[test]
    fn test_write_results_caps_rows() {
        let mut table = Table::new("movie");
        table.add_column(Column::new("id", "movie", FieldKind::Integer));
        for i in 0..1200i64 {
            table.add_row(Row::new(vec![Field::Int(i)])).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = write_results(&table, dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("... and 200 more rows"));
    }

    #[test]
    fn test_write_results_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        write_results(&small_table(), dir.path()).unwrap();
        let path = write_results(&small_table(), dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.matches("Query Result").count(), 1);
    }
}
