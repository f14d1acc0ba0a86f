//! Query description parser
//!
//! Reads the line-oriented workbench format: lines before `query_start`
//! are ignored, the block ends at `query_end`, and each recognised line
//! is `section: comma-separated items`. Scalar-filter literals are typed
//! from the referenced column, so the schema is needed at parse time.

use crate::catalog::{CompareOp, Field, FieldKind, Schema};

use super::error::{QueryError, QueryResult};
use super::{ColumnPair, QuerySpec, ScalarFilter};

/// Parse a query block into a validated `QuerySpec`
pub fn parse_query_block(lines: &[String], schema: &Schema) -> QueryResult<QuerySpec> {
    let mut query = QuerySpec::default();
    let mut started = false;

    for raw in lines {
        let line = raw.trim();
        if line == "query_start" {
            started = true;
            continue;
        }
        if line == "query_end" {
            break;
        }
        if !started || line.is_empty() {
            continue;
        }

        let Some((section, content)) = line.split_once(':') else {
            continue;
        };
        let section = section.trim().to_lowercase();
        let content = content.trim();
        if content.is_empty() {
            continue;
        }

        match section.as_str() {
            "tables" => {
                for name in split_items(content) {
                    query.tables.push(name.to_string());
                }
            }
            "scalar_filters" => {
                for item in split_items(content) {
                    query.scalar_filters.push(parse_scalar_filter(item, schema)?);
                }
            }
            "dynamic_filters" => {
                for item in split_items(content) {
                    query.dynamic_filters.push(parse_column_pair(item)?);
                }
            }
            "joins" => {
                for item in split_items(content) {
                    query.joins.push(parse_column_pair(item)?);
                }
            }
            _ => {}
        }
    }

    if query.tables.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    query.validate(schema)?;
    Ok(query)
}

/// Split a section body on commas, trimming and dropping empty items
fn split_items(content: &str) -> impl Iterator<Item = &str> {
    content.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `table.column OP literal`, typing the literal from the column
fn parse_scalar_filter(item: &str, schema: &Schema) -> QueryResult<ScalarFilter> {
    // Two-character operators are tried first so ">=" never parses as ">"
    let (op, op_pos) = CompareOp::ALL
        .into_iter()
        .find_map(|op| item.find(op.as_str()).map(|pos| (op, pos)))
        .ok_or_else(|| QueryError::Malformed(item.to_string()))?;

    let lhs = &item[..op_pos];
    let value = item[op_pos + op.as_str().len()..].trim();
    let (table, column) = parse_table_column(lhs)?;

    let table_ref = schema
        .table(&table)
        .ok_or_else(|| QueryError::TableNotFound(table.clone()))?;
    let col = table_ref
        .column_by_name(&column)
        .ok_or_else(|| QueryError::ColumnNotFound {
            table: table.clone(),
            column: column.clone(),
        })?;

    let value = match col.kind {
        FieldKind::Integer => {
            let parsed = value
                .parse::<i64>()
                .map_err(|_| QueryError::InvalidLiteral {
                    value: value.to_string(),
                    column: format!("{}.{}", table, column),
                })?;
            Field::Int(parsed)
        }
        FieldKind::String => Field::Str(value.to_string()),
    };

    Ok(ScalarFilter {
        table,
        column,
        op,
        value,
    })
}

/// Parse `table1.col1 = table2.col2` (equality only)
fn parse_column_pair(item: &str) -> QueryResult<ColumnPair> {
    let (lhs, rhs) = item
        .split_once('=')
        .ok_or_else(|| QueryError::Malformed(item.to_string()))?;
    let (left_table, left_column) = parse_table_column(lhs)?;
    let (right_table, right_column) = parse_table_column(rhs)?;
    Ok(ColumnPair {
        left_table,
        left_column,
        right_table,
        right_column,
    })
}

/// Parse a `table.column` reference
fn parse_table_column(input: &str) -> QueryResult<(String, String)> {
    let (table, column) = input
        .trim()
        .split_once('.')
        .ok_or_else(|| QueryError::Malformed(input.trim().to_string()))?;
    let table = table.trim();
    let column = column.trim();
    if table.is_empty() || column.is_empty() {
        return Err(QueryError::Malformed(input.trim().to_string()));
    }
    Ok((table.to_string(), column.to_string()))
}
