//! Dataset loader
//!
//! Reads the line-oriented schema file (`TABLE(col type, ...)`) and one
//! pipe-delimited data file per table. Malformed values that can be
//! repaired are warned about and repaired; anything else fails the load.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{CatalogError, Column, Field, FieldKind, Row, Schema, Table};

/// Load operation errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// Schema or data file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Schema line is not `TABLE(col type, ...)`
    #[error("malformed schema line: {0}")]
    MalformedSchemaLine(String),

    /// Column type is neither `int` nor `string`
    #[error("unknown column type '{column_type}' in schema line '{line}'")]
    UnknownColumnType { column_type: String, line: String },

    /// Integer field failed to parse
    #[error("invalid integer '{value}' at column {column} in {path}")]
    InvalidInteger {
        value: String,
        column: usize,
        path: String,
    },

    /// Row rejected by the table (arity or kind mismatch)
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Load the schema file and every table's `<table>.txt` data file
pub fn load_dataset(schema_path: &Path, data_dir: &Path) -> LoadResult<Schema> {
    let mut tables = load_schema_tables(schema_path)?;
    tables.sort_by(|a, b| a.name.cmp(&b.name));

    let mut schema = Schema::new();
    for mut table in tables {
        let data_path = data_dir.join(format!("{}.txt", table.name));
        load_table_data(&mut table, &data_path)?;
        info!(table = %table.name, rows = table.len(), "loaded table");
        schema.add_table(table)?;
    }
    Ok(schema)
}

/// Parse the schema file into empty tables
pub fn load_schema_tables(path: &Path) -> LoadResult<Vec<Table>> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut tables = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        tables.push(parse_schema_line(line)?);
    }
    Ok(tables)
}

/// Parse one `TABLE(col type, ...)` line
fn parse_schema_line(line: &str) -> LoadResult<Table> {
    let (table_name, rest) = line
        .split_once('(')
        .ok_or_else(|| LoadError::MalformedSchemaLine(line.to_string()))?;
    let table_name = table_name.trim();
    if table_name.is_empty() {
        return Err(LoadError::MalformedSchemaLine(line.to_string()));
    }

    let mut table = Table::new(table_name);
    for column_def in rest.split(',') {
        let column_def = column_def.trim().trim_end_matches(')').trim();
        if column_def.is_empty() {
            continue;
        }
        let (name, column_type) = column_def
            .split_once(char::is_whitespace)
            .ok_or_else(|| LoadError::MalformedSchemaLine(line.to_string()))?;

        // Some schema dumps prefix the first column with a marker character
        let name = name
            .strip_prefix(|c: char| !c.is_alphabetic())
            .unwrap_or(name);

        let kind = match column_type.trim() {
            "int" => FieldKind::Integer,
            "string" => FieldKind::String,
            other => {
                return Err(LoadError::UnknownColumnType {
                    column_type: other.to_string(),
                    line: line.to_string(),
                })
            }
        };
        table.add_column(Column::new(name, table_name, kind));
    }
    Ok(table)
}

/// Load one pipe-delimited data file into a table
///
/// Blank lines are skipped, fields are trimmed, empty integer fields
/// parse to 0 with a warning, and a column-count mismatch warns before
/// the insert is attempted anyway. Integer histograms are rebuilt once
/// the file is fully loaded.
pub fn load_table_data(table: &mut Table, path: &Path) -> LoadResult<()> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "loading data");

    let column_count = table.columns().len();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = Vec::with_capacity(column_count);
        let mut field_count = 0;
        for value in line.split('|') {
            let value = value.trim();
            field_count += 1;
            let Some(column) = table.columns().get(field_count - 1) else {
                continue;
            };
            match column.kind {
                FieldKind::Integer => {
                    if value.is_empty() {
                        warn!(
                            table = %table.name,
                            column = field_count - 1,
                            "empty integer field, defaulting to 0"
                        );
                        fields.push(Field::Int(0));
                    } else {
                        let parsed =
                            value
                                .parse::<i64>()
                                .map_err(|_| LoadError::InvalidInteger {
                                    value: value.to_string(),
                                    column: field_count - 1,
                                    path: path.display().to_string(),
                                })?;
                        fields.push(Field::Int(parsed));
                    }
                }
                FieldKind::String => fields.push(Field::Str(value.to_string())),
            }
        }

        if field_count != column_count {
            warn!(
                table = %table.name,
                got = field_count,
                expected = column_count,
                "row column count mismatch"
            );
        }
        table.add_row(Row::new(fields))?;
    }

    table.rebuild_int_histograms();
    Ok(())
}
