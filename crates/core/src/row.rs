//! Output row structure for Sift.
//!
//! This module defines the `Row` struct, one aggregated result per group: the
//! group's key entries followed by the aggregate entry.

use crate::record::Record;
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// An insertion-ordered mapping from label to value.
#[derive(Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an empty row with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builds a row from label/value pairs, applying `insert` in order.
    pub fn from_pairs<L, V, I>(pairs: I) -> Self
    where
        L: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (L, V)>,
    {
        let mut row = Self::new();
        for (label, value) in pairs {
            row.insert(label, value);
        }
        row
    }

    /// Sets `label` to `value`.
    ///
    /// An existing entry keeps its position and gets the new value; a new
    /// label is appended. Returns the replaced value, if any.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => Some(core::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.push((label, value));
                None
            }
        }
    }

    /// Gets the value for a label.
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    /// Returns true if the row has an entry for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Returns the labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    /// Returns the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns the entries in insertion order.
    #[inline]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Returns the number of entries in this row.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this row has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (label, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': {}", label, value)?;
        }
        f.write_str("}")
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Rows are key-indexed records, so aggregated output can be selected again.
impl Record for Row {
    fn get(&self, key: &str) -> Option<Value> {
        Row::get(self, key).cloned()
    }

    fn index_keys(&self) -> Vec<&str> {
        self.labels().collect()
    }

    fn to_value(&self) -> Value {
        Value::Tuple(self.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn test_row_insert_order() {
        let mut row = Row::new();
        row.insert("odd_or_even", "even");
        row.insert("max", 10i64);

        assert_eq!(row.len(), 2);
        assert_eq!(row.labels().collect::<Vec<_>>(), vec!["odd_or_even", "max"]);
        assert_eq!(row.get("max"), Some(&Value::Int64(10)));
        assert_eq!(row.get("min"), None);
    }

    #[test]
    fn test_row_insert_overwrites_in_place() {
        let mut row = Row::from_pairs([("value", Value::Int64(1)), ("other", Value::Int64(2))]);
        let old = row.insert("value", 5i64);

        assert_eq!(old, Some(Value::Int64(1)));
        assert_eq!(row.len(), 2);
        assert_eq!(row.entries()[0], ("value".into(), Value::Int64(5)));
    }

    #[test]
    fn test_row_equality_is_ordered() {
        let a = Row::from_pairs([("a", 1i64), ("b", 2i64)]);
        let b = Row::from_pairs([("b", 2i64), ("a", 1i64)]);
        assert_ne!(a, b);
        assert_eq!(a, Row::from_pairs([("a", 1i64), ("b", 2i64)]));
    }

    #[test]
    fn test_row_debug() {
        let row = Row::from_pairs([("level", Value::from("senior")), ("len", Value::Int64(3))]);
        assert_eq!(format!("{:?}", row), "{'level': 'senior', 'len': 3}");
    }

    #[test]
    fn test_row_as_record() {
        let row = Row::from_pairs([("level", "senior")]);
        assert_eq!(Record::get(&row, "level"), Some(Value::from("senior")));
        assert_eq!(row.field("level"), None);
        assert!(!row.is_empty());
    }
}
