//! Metadata filter evaluation.
//!
//! Evaluates a `FilterExpression` against a record's metadata map. All
//! fields are ANDed. Unknown operators fail closed: the record is
//! excluded and a skip counter is bumped so operators can spot filters
//! that silently match nothing.

use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tracing::warn;
use vector_types::{FilterCondition, FilterExpression, FilterOp, Metadata};

/// Evaluates metadata predicates; counts unsupported-operator skips.
#[derive(Debug, Default)]
pub struct FilterEvaluator {
    unsupported_skips: AtomicU64,
}

/// Equality with numeric awareness: `4` and `4.0` compare equal.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

impl FilterEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `metadata` satisfies every field condition in `filter`.
    pub fn matches(&self, metadata: &Metadata, filter: &FilterExpression) -> bool {
        for (field, condition) in &filter.fields {
            match condition {
                FilterCondition::Literal(expected) => {
                    match metadata.get(field) {
                        Some(actual) if values_equal(actual, expected) => {}
                        _ => return false,
                    }
                }
                FilterCondition::Ops(ops) => {
                    for (token, operand) in ops {
                        let Some(op) = FilterOp::parse(token) else {
                            self.unsupported_skips.fetch_add(1, Ordering::Relaxed);
                            warn!(operator = %token, field = %field, "Unsupported filter operator, excluding record");
                            return false;
                        };
                        if !self.apply_op(metadata.get(field), op, operand) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Number of records excluded because a filter used an operator the
    /// evaluator does not understand.
    pub fn unsupported_skips(&self) -> u64 {
        self.unsupported_skips.load(Ordering::Relaxed)
    }

    fn apply_op(&self, actual: Option<&Value>, op: FilterOp, operand: &Value) -> bool {
        match op {
            // $ne is the one operator an absent field satisfies
            FilterOp::Ne => match actual {
                Some(value) => !values_equal(value, operand),
                None => true,
            },
            // Ordered comparisons require a present, numeric field
            FilterOp::Gt | FilterOp::Gte | FilterOp::Lt | FilterOp::Lte => {
                let (Some(lhs), Some(rhs)) = (actual.and_then(Value::as_f64), operand.as_f64())
                else {
                    return false;
                };
                match op {
                    FilterOp::Gt => lhs > rhs,
                    FilterOp::Gte => lhs >= rhs,
                    FilterOp::Lt => lhs < rhs,
                    FilterOp::Lte => lhs <= rhs,
                    FilterOp::Ne => unreachable!(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vector_types::Metadata;

    fn meta(pairs: &[(&str, Value)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn filter(value: Value) -> FilterExpression {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let evaluator = FilterEvaluator::new();
        assert!(evaluator.matches(&Metadata::new(), &FilterExpression::new()));
        assert!(evaluator.matches(
            &meta(&[("category", json!("A"))]),
            &FilterExpression::new()
        ));
    }

    #[test]
    fn test_equality() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"category": "A"}));
        assert!(evaluator.matches(&meta(&[("category", json!("A"))]), &f));
        assert!(!evaluator.matches(&meta(&[("category", json!("B"))]), &f));
        // Absent field fails equality
        assert!(!evaluator.matches(&Metadata::new(), &f));
    }

    #[test]
    fn test_numeric_equality_across_int_and_float() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"importance": 4}));
        assert!(evaluator.matches(&meta(&[("importance", json!(4.0))]), &f));
    }

    #[test]
    fn test_gte_excludes_missing_and_low() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"importance": {"$gte": 4}}));
        assert!(evaluator.matches(&meta(&[("importance", json!(4))]), &f));
        assert!(evaluator.matches(&meta(&[("importance", json!(9.5))]), &f));
        assert!(!evaluator.matches(&meta(&[("importance", json!(3))]), &f));
        assert!(!evaluator.matches(&Metadata::new(), &f));
        // Non-numeric value cannot satisfy an ordered comparison
        assert!(!evaluator.matches(&meta(&[("importance", json!("high"))]), &f));
    }

    #[test]
    fn test_gt_lt_lte() {
        let evaluator = FilterEvaluator::new();
        let m = meta(&[("age", json!(5))]);
        assert!(evaluator.matches(&m, &filter(json!({"age": {"$gt": 4}}))));
        assert!(!evaluator.matches(&m, &filter(json!({"age": {"$gt": 5}}))));
        assert!(evaluator.matches(&m, &filter(json!({"age": {"$lt": 6}}))));
        assert!(!evaluator.matches(&m, &filter(json!({"age": {"$lt": 5}}))));
        assert!(evaluator.matches(&m, &filter(json!({"age": {"$lte": 5}}))));
        assert!(!evaluator.matches(&m, &filter(json!({"age": {"$lte": 4}}))));
    }

    #[test]
    fn test_ne_matches_absent_field() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"category": {"$ne": "A"}}));
        assert!(evaluator.matches(&Metadata::new(), &f));
        assert!(evaluator.matches(&meta(&[("category", json!("B"))]), &f));
        assert!(!evaluator.matches(&meta(&[("category", json!("A"))]), &f));
    }

    #[test]
    fn test_fields_are_anded() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"category": "A", "importance": {"$gte": 4}}));
        assert!(evaluator.matches(
            &meta(&[("category", json!("A")), ("importance", json!(7))]),
            &f
        ));
        assert!(!evaluator.matches(
            &meta(&[("category", json!("A")), ("importance", json!(1))]),
            &f
        ));
        assert!(!evaluator.matches(
            &meta(&[("category", json!("B")), ("importance", json!(7))]),
            &f
        ));
    }

    #[test]
    fn test_unknown_operator_fails_closed_and_counts() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"score": {"$near": 0.5}}));
        let m = meta(&[("score", json!(0.5))]);

        assert!(!evaluator.matches(&m, &f));
        assert!(!evaluator.matches(&m, &f));
        assert_eq!(evaluator.unsupported_skips(), 2);
    }

    #[test]
    fn test_stacked_operators_form_a_range() {
        let evaluator = FilterEvaluator::new();
        let f = filter(json!({"age": {"$gte": 2, "$lt": 5}}));
        assert!(evaluator.matches(&meta(&[("age", json!(3))]), &f));
        assert!(!evaluator.matches(&meta(&[("age", json!(1))]), &f));
        assert!(!evaluator.matches(&meta(&[("age", json!(5))]), &f));
    }
}
