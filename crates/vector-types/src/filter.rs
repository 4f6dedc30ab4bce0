//! Metadata filter expressions.
//!
//! A filter is a mapping from metadata field name to either a literal
//! (equality) or an operator object such as `{"$gte": 4}`. Top-level
//! fields are implicitly AND-combined; there is no OR/NOT combinator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Comparison operators supported in operator objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Strictly greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Strictly less than
    Lt,
    /// Less than or equal
    Lte,
    /// Not equal (matches absent fields)
    Ne,
}

impl FilterOp {
    /// Parse an operator token (`"$gt"`, `"$ne"`, ...).
    ///
    /// Returns `None` for unknown tokens; evaluation treats those as
    /// unsupported and fails closed.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "$gt" => Some(FilterOp::Gt),
            "$gte" => Some(FilterOp::Gte),
            "$lt" => Some(FilterOp::Lt),
            "$lte" => Some(FilterOp::Lte),
            "$ne" => Some(FilterOp::Ne),
            _ => None,
        }
    }

    /// The wire token for this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Gt => "$gt",
            FilterOp::Gte => "$gte",
            FilterOp::Lt => "$lt",
            FilterOp::Lte => "$lte",
            FilterOp::Ne => "$ne",
        }
    }
}

/// Condition applied to a single metadata field.
///
/// JSON objects are always interpreted as operator objects, so raw
/// object literals cannot be used as equality targets. Operator keys
/// are kept as strings so that unknown operators survive
/// deserialization and can be rejected at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterCondition {
    /// Operator object, e.g. `{"$gte": 4}`
    Ops(BTreeMap<String, Value>),
    /// Literal equality target
    Literal(Value),
}

/// A conjunction of per-field conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterExpression {
    /// Field name -> condition, all ANDed
    pub fields: BTreeMap<String, FilterCondition>,
}

impl FilterExpression {
    /// Create an empty filter (matches every record).
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`.
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields
            .insert(field.into(), FilterCondition::Literal(value.into()));
        self
    }

    /// Require `field <op> value`.
    ///
    /// Stacking multiple operators on the same field merges them into
    /// one operator object.
    pub fn field_op(
        mut self,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        let entry = self
            .fields
            .entry(field)
            .or_insert_with(|| FilterCondition::Ops(BTreeMap::new()));

        match entry {
            FilterCondition::Ops(ops) => {
                ops.insert(op.as_str().to_string(), value.into());
            }
            FilterCondition::Literal(_) => {
                let mut ops = BTreeMap::new();
                ops.insert(op.as_str().to_string(), value.into());
                *entry = FilterCondition::Ops(ops);
            }
        }
        self
    }

    /// Whether this filter constrains anything.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
