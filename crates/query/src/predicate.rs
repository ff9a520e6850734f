//! Predicate definitions for record filtering.

use crate::access::{CaseSensitivity, KeyAccessor};
use alloc::string::String;
use sift_core::{Record, Value};

/// Evaluation type for predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvalType {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl EvalType {
    /// Applies the comparison to `left` and `right`.
    pub fn compare(&self, left: &Value, right: &Value) -> bool {
        match self {
            EvalType::Eq => left == right,
            EvalType::Ne => left != right,
            EvalType::Lt => left < right,
            EvalType::Le => left <= right,
            EvalType::Gt => left > right,
            EvalType::Ge => left >= right,
        }
    }
}

/// A predicate that can be evaluated against records.
///
/// Every `Fn(&R) -> bool` closure is a predicate.
pub trait Predicate<R: ?Sized> {
    /// Evaluates the predicate against a record.
    fn eval(&self, record: &R) -> bool;
}

impl<R: ?Sized, F> Predicate<R> for F
where
    F: Fn(&R) -> bool,
{
    fn eval(&self, record: &R) -> bool {
        self(record)
    }
}

/// A value predicate compares a record, or one named value of it, to a literal.
#[derive(Clone, Debug)]
pub struct ValuePredicate {
    /// Compared key; None compares the whole record value.
    pub key: Option<KeyAccessor>,
    pub eval_type: EvalType,
    pub value: Value,
}

impl ValuePredicate {
    /// Creates a predicate comparing the whole record value with `value`.
    pub fn new(eval_type: EvalType, value: impl Into<Value>) -> Self {
        Self {
            key: None,
            eval_type,
            value: value.into(),
        }
    }

    pub fn eq(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Eq, value)
    }

    pub fn ne(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Ne, value)
    }

    pub fn lt(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Lt, value)
    }

    pub fn le(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Le, value)
    }

    pub fn gt(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Gt, value)
    }

    pub fn ge(value: impl Into<Value>) -> Self {
        Self::new(EvalType::Ge, value)
    }

    /// Compares the named value instead of the whole record.
    pub fn on(mut self, key: impl Into<String>) -> Self {
        self.key = Some(KeyAccessor::new([key.into()]));
        self
    }

    /// Sets how the key name is matched.
    pub fn case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.key = self.key.map(|k| k.case_sensitivity(case));
        self
    }
}

impl<R: Record + ?Sized> Predicate<R> for ValuePredicate {
    fn eval(&self, record: &R) -> bool {
        let left = match &self.key {
            None => record.to_value(),
            Some(accessor) => match accessor.access(record) {
                Ok(key) => key.into_value(),
                Err(_) => return false,
            },
        };
        self.eval_type.compare(&left, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::{Mapping, Struct};

    #[test]
    fn test_value_predicate_whole_value() {
        let pred = ValuePredicate::le(10i64);
        assert!(pred.eval(&10i64));
        assert!(pred.eval(&3i64));
        assert!(!pred.eval(&11i64));
    }

    #[test]
    fn test_value_predicate_all_eval_types() {
        let five = Value::Int64(5);
        assert!(EvalType::Eq.compare(&five, &Value::Int64(5)));
        assert!(EvalType::Ne.compare(&five, &Value::Int64(6)));
        assert!(EvalType::Lt.compare(&five, &Value::Int64(6)));
        assert!(EvalType::Le.compare(&five, &Value::Int64(5)));
        assert!(EvalType::Gt.compare(&five, &Value::Int64(4)));
        assert!(EvalType::Ge.compare(&five, &Value::Float64(5.0)));
    }

    #[test]
    fn test_value_predicate_on_key() {
        let dev = Struct::new("Developer").with("level", "senior");
        assert!(ValuePredicate::eq("senior").on("level").eval(&dev));
        assert!(!ValuePredicate::eq("junior").on("level").eval(&dev));

        let mut m = Mapping::new();
        m.insert("age".into(), Value::Int64(30));
        assert!(ValuePredicate::gt(18i64).on("age").eval(&m));
    }

    #[test]
    fn test_value_predicate_missing_key_is_false() {
        let dev = Struct::new("Developer").with("level", "senior");
        assert!(!ValuePredicate::ne("x").on("country").eval(&dev));
    }

    #[test]
    fn test_value_predicate_case_sensitivity() {
        let dev = Struct::new("Developer").with("level", "senior");
        assert!(ValuePredicate::eq("senior").on("LEVEL").eval(&dev));
        let strict = ValuePredicate::eq("senior")
            .on("LEVEL")
            .case_sensitivity(CaseSensitivity::Sensitive);
        assert!(!strict.eval(&dev));
    }

    #[test]
    fn test_closure_predicate() {
        let even = |n: &i64| n % 2 == 0;
        assert!(even.eval(&4));
        assert!(!Predicate::eval(&even, &3));
    }
}
