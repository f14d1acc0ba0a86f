//! Query model - structured, validated query descriptions
//!
//! A query names its base tables, scalar filters (column vs. literal),
//! dynamic filters (column = column, accepted but unused by the
//! planners), and equi-joins. Validation runs against the schema before
//! any planning happens.

pub mod error;
pub mod parser;

pub use error::{QueryError, QueryResult};
pub use parser::parse_query_block;

use std::fmt;

use crate::catalog::{CompareOp, Field, FieldKind, Schema};

/// A filter comparing one column against a literal
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarFilter {
    /// Base table the column belongs to
    pub table: String,
    /// Column name
    pub column: String,
    /// Comparison operator
    pub op: CompareOp,
    /// Literal to compare against
    pub value: Field,
}

impl fmt::Display for ScalarFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} {} {}",
            self.table, self.column, self.op, self.value
        )
    }
}

/// An equality between two base-table-qualified columns
///
/// Used for both joins and dynamic filters; only equality is supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPair {
    pub left_table: String,
    pub left_column: String,
    pub right_table: String,
    pub right_column: String,
}

impl fmt::Display for ColumnPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} = {}.{}",
            self.left_table, self.left_column, self.right_table, self.right_column
        )
    }
}

/// A structured query description
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    /// Base tables, in input order
    pub tables: Vec<String>,
    /// Scalar filters, in input order
    pub scalar_filters: Vec<ScalarFilter>,
    /// Dynamic filters; parsed and validated but not planned
    pub dynamic_filters: Vec<ColumnPair>,
    /// Equi-joins, in input order
    pub joins: Vec<ColumnPair>,
}

impl QuerySpec {
    /// Validate the query against a schema
    ///
    /// Checks that every referenced table exists and is listed under
    /// `tables`, every column exists on its stated base table, scalar
    /// literals match their column's kind, and both sides of every join
    /// or dynamic filter agree on kind.
    pub fn validate(&self, schema: &Schema) -> QueryResult<()> {
        if self.tables.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        for table in &self.tables {
            if !schema.table_exists(table) {
                return Err(QueryError::TableNotFound(table.clone()));
            }
        }

        for filter in &self.scalar_filters {
            let kind = self.column_kind(schema, &filter.table, &filter.column)?;
            if filter.value.kind() != kind {
                return Err(QueryError::FilterKindMismatch {
                    table: filter.table.clone(),
                    column: filter.column.clone(),
                    expected: kind,
                    got: filter.value.kind(),
                });
            }
        }

        for pair in self.joins.iter().chain(&self.dynamic_filters) {
            let left_kind = self.column_kind(schema, &pair.left_table, &pair.left_column)?;
            let right_kind = self.column_kind(schema, &pair.right_table, &pair.right_column)?;
            if left_kind != right_kind {
                return Err(QueryError::JoinKindMismatch {
                    left: format!("{}.{}", pair.left_table, pair.left_column),
                    left_kind,
                    right: format!("{}.{}", pair.right_table, pair.right_column),
                    right_kind,
                });
            }
        }

        Ok(())
    }

    /// Resolve a referenced column to its kind
    fn column_kind(&self, schema: &Schema, table: &str, column: &str) -> QueryResult<FieldKind> {
        if !self.tables.iter().any(|t| t == table) {
            return Err(QueryError::TableNotListed(table.to_string()));
        }
        let table_ref = schema
            .table(table)
            .ok_or_else(|| QueryError::TableNotFound(table.to_string()))?;
        let col = table_ref
            .column_by_name(column)
            .ok_or_else(|| QueryError::ColumnNotFound {
                table: table.to_string(),
                column: column.to_string(),
            })?;
        Ok(col.kind)
    }
}

impl fmt::Display for QuerySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tables:")?;
        for table in &self.tables {
            writeln!(f, "  {}", table)?;
        }
        writeln!(f, "Scalar Filters:")?;
        if self.scalar_filters.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for filter in &self.scalar_filters {
            writeln!(f, "  {}", filter)?;
        }
        writeln!(f, "Dynamic Filters:")?;
        if self.dynamic_filters.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for pair in &self.dynamic_filters {
            writeln!(f, "  {}", pair)?;
        }
        writeln!(f, "Joins:")?;
        if self.joins.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for join in &self.joins {
            writeln!(f, "  {}", join)?;
        }
        Ok(())
    }
}
