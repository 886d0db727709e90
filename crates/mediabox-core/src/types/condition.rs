//! Extra query conditions for filtered retrieval.

use serde::{Deserialize, Serialize};

/// Comparison operator for a field condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOp {
    /// Exact equality.
    Eq,
    /// SQL `LIKE` pattern match.
    Like,
}

/// A condition value that can represent the SQL types this module filters on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
}

/// An extra condition a caller can attach to a listing query.
///
/// Field conditions are bound as parameters; `Raw` carries a bare SQL
/// fragment and is trusted from the caller, mirroring the legacy string
/// condition shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// A single column comparison.
    Field {
        /// The column to filter on.
        column: String,
        /// The comparison operator.
        op: ConditionOp,
        /// The value to compare against.
        value: ConditionValue,
    },
    /// A bare SQL fragment, e.g. `"size > 1024"`.
    Raw(String),
}

impl Condition {
    /// Shorthand for an equality condition.
    pub fn eq(column: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Self::Field {
            column: column.into(),
            op: ConditionOp::Eq,
            value: value.into(),
        }
    }

    /// Shorthand for a LIKE condition.
    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Field {
            column: column.into(),
            op: ConditionOp::Like,
            value: ConditionValue::String(pattern.into()),
        }
    }

    /// A raw SQL fragment condition.
    pub fn raw(fragment: impl Into<String>) -> Self {
        Self::Raw(fragment.into())
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<i64> for ConditionValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for ConditionValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}
