//! Stock aggregate functions.
//!
//! Plain functions (`len`, `max`, `min`, `sum`, `mean`) are meant for
//! `LabeledAggregate::from_fn`, which labels them by name. `MostPopularValue`
//! is an `Aggregator` object with its own label.

use crate::access::KeyAccessor;
use crate::label::Aggregator;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;
use sift_core::{Error, Record, Result, Value};

/// Number of records in the group.
pub fn len<R: ?Sized>(group: &[&R]) -> Result<Value> {
    Ok(Value::from(group.len()))
}

/// Largest non-null record value. Fails on an empty group; an all-null group yields Null.
pub fn max<R: Record + ?Sized>(group: &[&R]) -> Result<Value> {
    extreme("max", group, |candidate, best| candidate > best)
}

/// Smallest non-null record value. Fails on an empty group; an all-null group yields Null.
pub fn min<R: Record + ?Sized>(group: &[&R]) -> Result<Value> {
    extreme("min", group, |candidate, best| candidate < best)
}

fn extreme<R: Record + ?Sized>(
    name: &str,
    group: &[&R],
    better: impl Fn(&Value, &Value) -> bool,
) -> Result<Value> {
    if group.is_empty() {
        return Err(Error::empty_group(name));
    }
    let mut best: Option<Value> = None;
    for record in group {
        let value = record.to_value();
        if value.is_null() {
            continue;
        }
        match &best {
            Some(current) if !better(&value, current) => {}
            _ => best = Some(value),
        }
    }
    Ok(best.unwrap_or(Value::Null))
}

/// Sum of the record values, skipping nulls.
///
/// Integer inputs give an Int64 sum; any float makes the sum a Float64.
pub fn sum<R: Record + ?Sized>(group: &[&R]) -> Result<Value> {
    let mut int_sum: i64 = 0;
    let mut float_sum: f64 = 0.0;
    let mut is_float = false;

    for record in group {
        match record.to_value() {
            Value::Null => {}
            Value::Int64(i) => {
                int_sum = int_sum
                    .checked_add(i)
                    .ok_or_else(|| Error::aggregate("integer overflow in sum"))?;
                float_sum += i as f64;
            }
            Value::Float64(f) => {
                is_float = true;
                float_sum += f;
            }
            other => return Err(Error::type_mismatch("sum", "numeric", other.data_type())),
        }
    }

    if is_float {
        Ok(Value::Float64(float_sum))
    } else {
        Ok(Value::Int64(int_sum))
    }
}

/// Arithmetic mean of the non-null record values.
pub fn mean<R: Record + ?Sized>(group: &[&R]) -> Result<Value> {
    let mut total = 0.0f64;
    let mut count = 0usize;
    for record in group {
        let value = record.to_value();
        if value.is_null() {
            continue;
        }
        match value.as_number() {
            Some(n) => {
                total += n;
                count += 1;
            }
            None => return Err(Error::type_mismatch("mean", "numeric", value.data_type())),
        }
    }
    if count == 0 {
        return Err(Error::empty_group("mean"));
    }
    Ok(Value::Float64(total / count as f64))
}

/// How `MostPopularValue` picks among values with the same count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The greatest value by natural `Value` ordering wins.
    #[default]
    Greatest,
    /// The value seen first in the group wins.
    FirstSeen,
}

/// The most frequent value (mode) in a group.
///
/// With no keys, counts whole record values. With one key, counts that key's
/// value and returns it as is; with several, counts and returns a tuple.
#[derive(Clone, Debug)]
pub struct MostPopularValue {
    accessor: Option<KeyAccessor>,
    tie_break: TieBreak,
}

impl MostPopularValue {
    /// Creates a mode aggregate over the given key names.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accessor = KeyAccessor::new(keys);
        Self {
            accessor: (!accessor.keys().is_empty()).then_some(accessor),
            tie_break: TieBreak::default(),
        }
    }

    /// Creates a mode aggregate over whole record values.
    pub fn whole_value() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Sets the tie-break rule.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns the output label: `MostPopular`, `MostPopular:<key>` or
    /// `MostPopular:('<k1>', '<k2>')`.
    pub fn label(&self) -> String {
        let keys = match &self.accessor {
            None => return String::from("MostPopular"),
            Some(accessor) => accessor.keys(),
        };
        if let [single] = keys {
            return format!("MostPopular:{}", single);
        }
        let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k)).collect();
        format!("MostPopular:({})", quoted.join(", "))
    }

    fn candidate<R: Record + ?Sized>(&self, record: &R) -> Result<Value> {
        match &self.accessor {
            None => Ok(record.to_value()),
            Some(accessor) => Ok(accessor.access(record)?.into_value()),
        }
    }
}

impl<R: Record + ?Sized> Aggregator<R> for MostPopularValue {
    fn aggregate(&self, group: &[&R]) -> Result<Value> {
        // Counts in first-seen order.
        let mut index: HashMap<Value, usize> = HashMap::new();
        let mut counts: Vec<(Value, usize)> = Vec::new();
        for record in group {
            let value = self.candidate(*record)?;
            match index.get(&value) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    index.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }

        let mut best: Option<&(Value, usize)> = None;
        for entry in &counts {
            let wins = match best {
                None => true,
                Some((value, count)) => {
                    entry.1 > *count
                        || (entry.1 == *count
                            && self.tie_break == TieBreak::Greatest
                            && entry.0 > *value)
                }
            };
            if wins {
                best = Some(entry);
            }
        }

        best.map(|(value, _)| value.clone())
            .ok_or_else(|| Error::empty_group(self.label()))
    }

    fn name(&self) -> Option<String> {
        Some(self.label())
    }
}
