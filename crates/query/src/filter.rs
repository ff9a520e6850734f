//! Filter executor.

use crate::predicate::Predicate;
use alloc::vec::Vec;

/// Filter executor - keeps records that satisfy a predicate.
pub struct FilterExecutor<P> {
    predicate: P,
}

impl<P> FilterExecutor<P> {
    /// Creates a new filter executor.
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }

    /// Executes the filter on the input records, preserving their order.
    pub fn execute<R>(&self, input: &[R]) -> Vec<R>
    where
        P: Predicate<R>,
        R: Clone,
    {
        filter_records(input, |record| self.predicate.eval(record))
    }
}

/// Filters records using a closure.
pub fn filter_records<R, F>(input: &[R], predicate: F) -> Vec<R>
where
    R: Clone,
    F: Fn(&R) -> bool,
{
    input.iter().filter(|r| predicate(r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ValuePredicate;
    use alloc::vec;
    use sift_core::Struct;

    #[test]
    fn test_filter_executor() {
        let data: Vec<i64> = (0..30).collect();
        let executor = FilterExecutor::new(ValuePredicate::le(10i64));

        let result = executor.execute(&data);
        assert_eq!(result, (0..=10).collect::<Vec<i64>>());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = vec![7i64, 1, 12, 4, 30, 9];
        let executor = FilterExecutor::new(ValuePredicate::lt(10i64));

        let once = executor.execute(&data);
        let twice = executor.execute(&once);
        assert_eq!(once, vec![7, 1, 4, 9]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_records_closure() {
        let data = vec![
            Struct::new("Developer").with("level", "senior"),
            Struct::new("Developer").with("level", "junior"),
        ];
        let executor = FilterExecutor::new(ValuePredicate::eq("junior").on("level"));
        assert_eq!(executor.execute(&data).len(), 1);

        let result = filter_records(&data, |d| d.name() == "Developer");
        assert_eq!(result.len(), 2);
    }
}
