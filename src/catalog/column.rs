//! Column definitions
//!
//! A column knows its name, the base table it originally came from
//! (preserved across joins and filters), its kind, and owns the
//! histogram for its values.

use crate::stats::{IntHistogram, StringHistogram};

use super::field::{Field, FieldKind};

/// Histogram owned by a column, matching the column kind
#[derive(Debug, Clone)]
pub enum ColumnHistogram {
    /// Histogram over integer values
    Int(IntHistogram),
    /// Histogram over hashed string values
    Str(StringHistogram),
}

/// A named, typed slot belonging to a table
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Name of the base table this column originally came from
    pub base_table: String,
    /// Kind of values the column holds
    pub kind: FieldKind,
    /// Value distribution statistics
    histogram: ColumnHistogram,
}

impl Column {
    /// Create a column with a fresh default histogram for its kind
    pub fn new(name: impl Into<String>, base_table: impl Into<String>, kind: FieldKind) -> Self {
        let histogram = match kind {
            FieldKind::Integer => ColumnHistogram::Int(IntHistogram::with_defaults()),
            FieldKind::String => ColumnHistogram::Str(StringHistogram::new()),
        };
        Column {
            name: name.into(),
            base_table: base_table.into(),
            kind,
            histogram,
        }
    }

    /// The column's histogram
    pub fn histogram(&self) -> &ColumnHistogram {
        &self.histogram
    }

    /// Record one value in the histogram
    ///
    /// The caller has already checked the field kind against the column.
    pub(crate) fn observe(&mut self, field: &Field) {
        match (&mut self.histogram, field) {
            (ColumnHistogram::Int(hist), Field::Int(v)) => hist.add(*v),
            (ColumnHistogram::Str(hist), Field::Str(s)) => hist.add(s),
            _ => {}
        }
    }

    /// Replace the integer histogram with an empty one over a new range
    ///
    /// No-op for string columns; their range is fixed.
    pub(crate) fn reset_int_histogram(&mut self, num_buckets: usize, min_val: i64, max_val: i64) {
        if let ColumnHistogram::Int(_) = self.histogram {
            self.histogram = ColumnHistogram::Int(IntHistogram::new(num_buckets, min_val, max_val));
        }
    }
}
