//! Aggregate executor.

use crate::group::group;
use crate::label::{KeyExtraction, LabeledAggregate};
use alloc::vec::Vec;
use log::{debug, trace};
use sift_core::{Result, Row};

/// Aggregate executor - groups records and reduces each group to one row.
pub struct AggregateExecutor<'f, R> {
    key_extraction: KeyExtraction<'f, R>,
    aggregate: LabeledAggregate<'f, R>,
}

impl<'f, R> AggregateExecutor<'f, R> {
    /// Creates a new aggregate executor.
    pub fn new(key_extraction: KeyExtraction<'f, R>, aggregate: LabeledAggregate<'f, R>) -> Self {
        Self {
            key_extraction,
            aggregate,
        }
    }

    /// Returns the key extraction the executor groups by.
    pub fn key_extraction(&self) -> &KeyExtraction<'f, R> {
        &self.key_extraction
    }

    /// Returns the aggregate applied to each group.
    pub fn aggregate(&self) -> &LabeledAggregate<'f, R> {
        &self.aggregate
    }

    /// Executes the aggregation, one row per group in first-seen order.
    pub fn execute(&self, records: &[R]) -> Result<Vec<Row>> {
        aggregate(records, &self.key_extraction, &self.aggregate)
    }
}

/// Groups `records` and builds one row per group: the key names zipped with
/// the group's key tuple, then the aggregate label mapped to its result.
///
/// An aggregate label equal to a key name overwrites that key's entry. Any
/// error from key extraction or from the aggregate aborts the whole call.
pub fn aggregate<R>(
    records: &[R],
    key_extraction: &KeyExtraction<'_, R>,
    aggregate: &LabeledAggregate<'_, R>,
) -> Result<Vec<Row>> {
    let groups = group(records, key_extraction)?;
    let keys = key_extraction.keys();
    let label = aggregate.label();

    let mut rows = Vec::with_capacity(groups.len());
    for entry in &groups {
        let mut row = Row::with_capacity(keys.len() + 1);
        for (name, value) in keys.iter().zip(entry.key().values()) {
            row.insert(name.as_str(), value.clone());
        }

        let result = aggregate.call(entry.records())?;
        if row.insert(label, result).is_some() {
            trace!("aggregate label {} overwrote a key entry", label);
        }
        rows.push(row);
    }

    debug!("aggregated {} records into {} rows as {}", records.len(), rows.len(), label);
    Ok(rows)
}
