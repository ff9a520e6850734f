//! Property-based tests for sift-query using proptest.

use proptest::prelude::*;
use sift_core::Value;
use sift_query::functions::len;
use sift_query::group::group;
use sift_query::{select, KeyExtraction, LabeledAggregate, Predicate, Selection, ValuePredicate};

fn float_key() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::num::f64::ANY,
        Just(0.0),
        Just(-0.0),
        Just(f64::NAN),
        Just(f64::from_bits(0x7ff8_0000_0000_0001)),
    ]
}

proptest! {
    /// Without filter and aggregate, select returns the input unchanged.
    #[test]
    fn select_noop_is_identity(data in prop::collection::vec(-1000i64..1000, 0..200)) {
        let out = select(&data, None, None, None).unwrap();
        prop_assert_eq!(out, Selection::Records(data.clone()));
    }

    /// Filtering keeps input order and filtering twice equals filtering once.
    #[test]
    fn filter_is_ordered_and_idempotent(
        data in prop::collection::vec(-1000i64..1000, 0..200),
        bound in -1000i64..1000,
    ) {
        let pred = ValuePredicate::lt(bound);
        let filter: &dyn Predicate<i64> = &pred;

        let once = select(&data, Some(filter), None, None).unwrap().into_records().unwrap();
        let twice = select(&once, Some(filter), None, None).unwrap().into_records().unwrap();

        let expected: Vec<i64> = data.iter().copied().filter(|n| *n < bound).collect();
        prop_assert_eq!(&once, &expected);
        prop_assert_eq!(once, twice);
    }

    /// The sum of group sizes equals the number of records.
    #[test]
    fn group_sizes_sum_to_record_count(
        data in prop::collection::vec(0i64..50, 0..300),
        modulus in 1i64..10,
    ) {
        let key = KeyExtraction::anonymous(move |n: &i64| n % modulus);
        let groups = group(&data, &key).unwrap();
        prop_assert_eq!(groups.record_count(), data.len());
        prop_assert!(groups.len() <= modulus as usize);
    }

    /// Group order equals the first-occurrence order of distinct keys.
    #[test]
    fn group_order_is_first_occurrence(data in prop::collection::vec(0i64..20, 0..200)) {
        let mut first_seen: Vec<i64> = Vec::new();
        for n in &data {
            if !first_seen.contains(n) {
                first_seen.push(*n);
            }
        }

        let rows = select(&data, None, None, Some(LabeledAggregate::from_fn(len)))
            .unwrap()
            .into_rows()
            .unwrap();

        let keys: Vec<Value> = rows.iter().map(|r| r.get("value").cloned().unwrap()).collect();
        let expected: Vec<Value> = first_seen.into_iter().map(Value::Int64).collect();
        prop_assert_eq!(keys, expected);

        let total: i64 = rows
            .iter()
            .map(|r| r.get("len").and_then(Value::as_i64).unwrap())
            .sum();
        prop_assert_eq!(total as usize, data.len());
    }

    /// Float keys form exactly one group per distinct value under `Value` equality.
    #[test]
    fn float_groups_match_distinct_values(data in prop::collection::vec(float_key(), 0..100)) {
        let mut distinct: Vec<Value> = Vec::new();
        for n in &data {
            let value = Value::Float64(*n);
            if !distinct.contains(&value) {
                distinct.push(value);
            }
        }

        let groups = group(&data, &KeyExtraction::identity()).unwrap();
        prop_assert_eq!(groups.len(), distinct.len());
        prop_assert_eq!(groups.record_count(), data.len());

        let rows = select(&data, None, None, Some(LabeledAggregate::from_fn(len)))
            .unwrap()
            .into_rows()
            .unwrap();
        let keys: Vec<Value> = rows.iter().map(|r| r.get("value").cloned().unwrap()).collect();
        prop_assert_eq!(keys, distinct);
    }
}
