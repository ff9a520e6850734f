//! The select pipeline: optional filter, then optional group and aggregate.

use crate::aggregate::aggregate;
use crate::filter::filter_records;
use crate::label::{KeyExtraction, LabeledAggregate};
use crate::predicate::Predicate;
use alloc::boxed::Box;
use alloc::vec::Vec;
use log::debug;
use sift_core::{Record, Result, Row};

/// The output of a select: the kept records, or one aggregated row per group.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<R> {
    Records(Vec<R>),
    Rows(Vec<Row>),
}

impl<R> Selection<R> {
    /// Returns the records, or None if the select aggregated.
    pub fn into_records(self) -> Option<Vec<R>> {
        match self {
            Selection::Records(records) => Some(records),
            Selection::Rows(_) => None,
        }
    }

    /// Returns the rows, or None if the select did not aggregate.
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            Selection::Rows(rows) => Some(rows),
            Selection::Records(_) => None,
        }
    }

    /// Returns true if the select aggregated.
    pub fn is_rows(&self) -> bool {
        matches!(self, Selection::Rows(_))
    }

    /// Returns the number of records or rows.
    pub fn len(&self) -> usize {
        match self {
            Selection::Records(records) => records.len(),
            Selection::Rows(rows) => rows.len(),
        }
    }

    /// Returns true if no records or rows were produced.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for a select over records of type `R`.
///
/// ```rust
/// use sift_query::{LabeledAggregate, KeyExtraction, Select, ValuePredicate};
/// use sift_query::functions::max;
/// use sift_core::{Row, Value};
///
/// fn odd_or_even(n: &i64) -> &'static str {
///     if n % 2 == 0 { "even" } else { "odd" }
/// }
///
/// let data: Vec<i64> = (0..30).collect();
/// let rows = Select::new()
///     .filter_with(ValuePredicate::le(10i64))
///     .group_by(KeyExtraction::named("odd_or_even", odd_or_even))
///     .aggregate(LabeledAggregate::named("max", max))
///     .execute(&data)
///     .unwrap()
///     .into_rows()
///     .unwrap();
///
/// assert_eq!(rows[0], Row::from_pairs([("odd_or_even", Value::from("even")), ("max", Value::Int64(10))]));
/// assert_eq!(rows[1], Row::from_pairs([("odd_or_even", Value::from("odd")), ("max", Value::Int64(9))]));
/// ```
pub struct Select<'f, R> {
    filter: Option<Box<dyn Predicate<R> + 'f>>,
    key_extraction: Option<KeyExtraction<'f, R>>,
    aggregate: Option<LabeledAggregate<'f, R>>,
}

impl<'f, R> Select<'f, R> {
    /// Creates a select that returns its input unchanged.
    pub fn new() -> Self {
        Self {
            filter: None,
            key_extraction: None,
            aggregate: None,
        }
    }

    /// Keeps only records the predicate accepts.
    pub fn filter_with(mut self, predicate: impl Predicate<R> + 'f) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    /// Sets the key extraction; only used when an aggregate is set.
    pub fn group_by(mut self, key_extraction: KeyExtraction<'f, R>) -> Self {
        self.key_extraction = Some(key_extraction);
        self
    }

    /// Groups and aggregates the (filtered) records.
    pub fn aggregate(mut self, aggregate: LabeledAggregate<'f, R>) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    /// Runs the select over `data`.
    pub fn execute(&self, data: &[R]) -> Result<Selection<R>>
    where
        R: Record + Clone,
    {
        run(
            data,
            self.filter.as_deref(),
            self.key_extraction.as_ref(),
            self.aggregate.as_ref(),
        )
    }
}

impl<R> Default for Select<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Filters, then groups and aggregates, `data`.
///
/// - With `filter_with`, only records it accepts are kept, in order.
/// - With `aggregate_function`, the records are grouped by
///   `key_extraction_function` (default: the record's own value, labeled
///   `value`) and one row per group is returned.
/// - Otherwise the (possibly filtered) records are returned.
///
/// `key_extraction_function` is ignored without an aggregate.
pub fn select<'f, R>(
    data: &[R],
    filter_with: Option<&dyn Predicate<R>>,
    key_extraction_function: Option<KeyExtraction<'f, R>>,
    aggregate_function: Option<LabeledAggregate<'f, R>>,
) -> Result<Selection<R>>
where
    R: Record + Clone,
{
    run(
        data,
        filter_with,
        key_extraction_function.as_ref(),
        aggregate_function.as_ref(),
    )
}

fn run<R>(
    data: &[R],
    filter_with: Option<&dyn Predicate<R>>,
    key_extraction: Option<&KeyExtraction<'_, R>>,
    aggregate_function: Option<&LabeledAggregate<'_, R>>,
) -> Result<Selection<R>>
where
    R: Record + Clone,
{
    let filtered = filter_with.map(|predicate| {
        let kept = filter_records(data, |record| predicate.eval(record));
        debug!("filter kept {} of {} records", kept.len(), data.len());
        kept
    });

    let Some(aggregate_function) = aggregate_function else {
        return Ok(Selection::Records(
            filtered.unwrap_or_else(|| data.to_vec()),
        ));
    };

    let records = filtered.as_deref().unwrap_or(data);
    let rows = match key_extraction {
        Some(key_extraction) => aggregate(records, key_extraction, aggregate_function)?,
        None => aggregate(records, &KeyExtraction::identity(), aggregate_function)?,
    };
    Ok(Selection::Rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::KeyAccessor;
    use crate::functions::{len, max, MostPopularValue};
    use crate::predicate::ValuePredicate;
    use alloc::vec;
    use sift_core::{Error, Value};

    fn odd_or_even(n: &i64) -> &'static str {
        if n % 2 == 0 {
            "even"
        } else {
            "odd"
        }
    }

    #[test]
    fn test_select_without_options_returns_input() {
        let data = vec![3i64, 1, 2];
        let out = select(&data, None, None, None).unwrap();
        assert_eq!(out, Selection::Records(data.clone()));
    }

    #[test]
    fn test_select_filter_only() {
        let data: Vec<i64> = (0..30).collect();
        let le10 = ValuePredicate::le(10i64);
        let filter: &dyn Predicate<i64> = &le10;
        let out = select(&data, Some(filter), None, None).unwrap();
        assert_eq!(out.into_records().unwrap(), (0..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_select_filter_group_aggregate() {
        let data: Vec<i64> = (0..30).collect();
        let le10 = ValuePredicate::le(10i64);
        let filter: &dyn Predicate<i64> = &le10;
        let out = select(
            &data,
            Some(filter),
            Some(KeyExtraction::from_fn(odd_or_even)),
            Some(LabeledAggregate::from_fn(max)),
        )
        .unwrap();

        assert_eq!(
            out,
            Selection::Rows(vec![
                Row::from_pairs([("odd_or_even", Value::from("even")), ("max", Value::Int64(10))]),
                Row::from_pairs([("odd_or_even", Value::from("odd")), ("max", Value::Int64(9))]),
            ])
        );
    }

    #[test]
    fn test_select_default_key_is_value() {
        let data = vec![1i64, 2, 2, 3, 3, 8, 8, 4, 3, 4, 8, 8, 10];
        let rows = select(&data, None, None, Some(LabeledAggregate::from_fn(len)))
            .unwrap()
            .into_rows()
            .unwrap();

        let expected: Vec<Row> = [(1i64, 1i64), (2, 2), (3, 3), (8, 4), (4, 2), (10, 1)]
            .into_iter()
            .map(|(value, count)| Row::from_pairs([("value", value), ("len", count)]))
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn test_select_key_ignored_without_aggregate() {
        let data = vec![1i64, 2];
        let out = select(&data, None, Some(KeyExtraction::from_fn(odd_or_even)), None).unwrap();
        assert!(!out.is_rows());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_select_builder_with_most_popular() {
        let data = vec![
            sift_core::Struct::new("Developer").with("level", "senior").with("country", "TW"),
            sift_core::Struct::new("Developer").with("level", "senior").with("country", "US"),
        ];
        let out = Select::new()
            .group_by(KeyExtraction::accessor(KeyAccessor::new(["level"])))
            .aggregate(LabeledAggregate::object(MostPopularValue::new(["country"])))
            .execute(&data)
            .unwrap();
        // Tie: the greatest country wins.
        assert_eq!(
            out.into_rows().unwrap(),
            vec![Row::from_pairs([
                ("level", Value::from("senior")),
                ("MostPopular:country", Value::from("US")),
            ])]
        );
    }

    #[test]
    fn test_select_builder_closure_filter() {
        let data: Vec<i64> = (0..10).collect();
        let out = Select::new()
            .filter_with(|n: &i64| n % 3 == 0)
            .execute(&data)
            .unwrap();
        assert_eq!(out, Selection::Records(vec![0, 3, 6, 9]));
        assert!(Select::<i64>::default().execute(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_select_propagates_errors() {
        let data = vec![1i64];
        let failing = LabeledAggregate::named("boom", |_: &[&i64]| Err(Error::aggregate("boom")));
        assert_eq!(
            select(&data, None, None, Some(failing)),
            Err(Error::aggregate("boom"))
        );
    }
}
