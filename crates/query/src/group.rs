//! Grouping engine.

use crate::access::KeyTuple;
use crate::label::KeyExtraction;
use alloc::vec::Vec;
use hashbrown::HashMap;
use log::trace;
use sift_core::Result;

/// Records sharing one key tuple, in input order.
#[derive(Debug)]
pub struct Group<'a, R> {
    key: KeyTuple,
    records: Vec<&'a R>,
}

impl<'a, R> Group<'a, R> {
    /// Returns the group's key tuple.
    #[inline]
    pub fn key(&self) -> &KeyTuple {
        &self.key
    }

    /// Returns the group's records.
    #[inline]
    pub fn records(&self) -> &[&'a R] {
        &self.records
    }

    /// Returns the number of records in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the group holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Groups keyed by key tuple, iterated in first-seen order.
#[derive(Debug)]
pub struct Groups<'a, R> {
    /// Position of each key in `groups`.
    index: HashMap<KeyTuple, usize>,
    groups: Vec<Group<'a, R>>,
}

impl<'a, R> Groups<'a, R> {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Appends a record to the group for `key`, opening the group on first sight.
    pub fn push(&mut self, key: KeyTuple, record: &'a R) {
        match self.index.get(&key) {
            Some(&pos) => self.groups[pos].records.push(record),
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(Group {
                    key,
                    records: alloc::vec![record],
                });
            }
        }
    }

    /// Returns the records of the group for `key`.
    pub fn get(&self, key: &KeyTuple) -> Option<&[&'a R]> {
        self.index
            .get(key)
            .map(|&pos| self.groups[pos].records.as_slice())
    }

    /// Returns the number of groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the total number of records across all groups.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Returns the key tuples in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyTuple> {
        self.groups.iter().map(Group::key)
    }

    /// Returns the groups in first-seen order.
    pub fn iter(&self) -> core::slice::Iter<'_, Group<'a, R>> {
        self.groups.iter()
    }
}

impl<R> Default for Groups<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, R> IntoIterator for Groups<'a, R> {
    type Item = Group<'a, R>;
    type IntoIter = alloc::vec::IntoIter<Group<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'g, 'a, R> IntoIterator for &'g Groups<'a, R> {
    type Item = &'g Group<'a, R>;
    type IntoIter = core::slice::Iter<'g, Group<'a, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partitions records by the key tuple `key_extraction` computes for each.
///
/// No record is dropped or duplicated, and records keep their relative order
/// inside a group. The first key extraction error aborts the grouping.
pub fn group<'a, R>(
    records: &'a [R],
    key_extraction: &KeyExtraction<'_, R>,
) -> Result<Groups<'a, R>> {
    let mut groups = Groups::new();
    for record in records {
        let key = key_extraction.extract(record)?;
        groups.push(key, record);
    }
    trace!(
        "grouped {} records into {} groups by {:?}",
        records.len(),
        groups.len(),
        key_extraction.keys()
    );
    Ok(groups)
}
