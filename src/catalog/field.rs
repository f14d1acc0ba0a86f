//! Field type - tagged values stored in table cells

use std::cmp::Ordering;
use std::fmt;

/// The kind of value a field or column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 64-bit signed integer
    Integer,
    /// UTF-8 string
    String,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "int"),
            FieldKind::String => write!(f, "string"),
        }
    }
}

/// Comparison operators accepted by filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    /// All operators in parse order: two-character forms must be tried
    /// before their one-character prefixes.
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Ge,
        CompareOp::Le,
        CompareOp::Ne,
        CompareOp::Eq,
        CompareOp::Gt,
        CompareOp::Lt,
    ];

    /// The operator's textual form
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }

    /// Parse an operator token
    pub fn parse(s: &str) -> Option<CompareOp> {
        CompareOp::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error comparing two fields of different kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMismatch {
    /// Kind of the left operand
    pub left: FieldKind,
    /// Kind of the right operand
    pub right: FieldKind,
}

impl fmt::Display for KindMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot compare {} with {}", self.left, self.right)
    }
}

impl std::error::Error for KindMismatch {}

/// A single value in a row: integer or string
///
/// Fields are immutable once constructed. Comparisons are defined only
/// between fields of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// Integer value
    Int(i64),
    /// String value
    Str(String),
}

impl Field {
    /// The kind of this field
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Int(_) => FieldKind::Integer,
            Field::Str(_) => FieldKind::String,
        }
    }

    /// Get the integer value, if this is an integer field
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Field::Int(i) => Some(*i),
            Field::Str(_) => None,
        }
    }

    /// Get the string value, if this is a string field
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Str(s) => Some(s),
            Field::Int(_) => None,
        }
    }

    /// Compare two fields of the same kind; cross-kind comparison is an error
    pub fn try_cmp(&self, other: &Field) -> Result<Ordering, KindMismatch> {
        match (self, other) {
            (Field::Int(a), Field::Int(b)) => Ok(a.cmp(b)),
            (Field::Str(a), Field::Str(b)) => Ok(a.cmp(b)),
            _ => Err(KindMismatch {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }

    /// Evaluate `self op other`
    pub fn satisfies(&self, op: CompareOp, other: &Field) -> Result<bool, KindMismatch> {
        let ord = self.try_cmp(other)?;
        Ok(match op {
            CompareOp::Eq => ord == Ordering::Equal,
            CompareOp::Ne => ord != Ordering::Equal,
            CompareOp::Lt => ord == Ordering::Less,
            CompareOp::Le => ord != Ordering::Greater,
            CompareOp::Gt => ord == Ordering::Greater,
            CompareOp::Ge => ord != Ordering::Less,
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(i) => write!(f, "{}", i),
            Field::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Int(v)
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::Str(v.to_string())
    }
}
