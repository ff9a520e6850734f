//! Key access over records.
//!
//! `KeyAccessor` pulls an ordered tuple of named values out of any `Record`,
//! trying named fields first and indexed keys second.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use sift_core::{Error, Record, Result, Value};

/// How key names are matched against field names and indexed keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Exact matches only.
    Sensitive,
    /// Exact match first, then an ASCII case-insensitive match.
    #[default]
    Insensitive,
}

/// The access strategy that resolved a key name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Named-field access.
    Field,
    /// Key-indexed access.
    Index,
}

/// Resolves one key name on a record, in strategy priority order.
pub fn resolve<R: Record + ?Sized>(
    record: &R,
    name: &str,
    case: CaseSensitivity,
) -> Option<(Access, Value)> {
    let field = lookup(
        record.field(name),
        || record.field_names(),
        |n| record.field(n),
        name,
        case,
    );
    if let Some(value) = field {
        return Some((Access::Field, value));
    }
    lookup(
        record.get(name),
        || record.index_keys(),
        |n| record.get(n),
        name,
        case,
    )
    .map(|value| (Access::Index, value))
}

fn lookup<'r>(
    exact: Option<Value>,
    names: impl FnOnce() -> Vec<&'r str>,
    fetch: impl Fn(&str) -> Option<Value>,
    name: &str,
    case: CaseSensitivity,
) -> Option<Value> {
    if exact.is_some() || case == CaseSensitivity::Sensitive {
        return exact;
    }
    names()
        .into_iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .and_then(fetch)
}

/// An ordered tuple of extracted key values; the identity of a group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyTuple(Vec<Value>);

impl KeyTuple {
    /// Creates a key tuple from values in key order.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Creates a one-element key tuple.
    pub fn single(value: Value) -> Self {
        Self(alloc::vec![value])
    }

    /// Returns the values in key order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Returns the number of key values.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the tuple holds no key values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the tuple, returning its values in key order.
    pub fn into_values(self) -> Vec<Value> {
        self.0
    }

    /// Collapses the tuple: one element yields that element, otherwise a `Value::Tuple`.
    pub fn into_value(mut self) -> Value {
        if self.0.len() == 1 {
            self.0.remove(0)
        } else {
            Value::Tuple(self.0)
        }
    }
}

impl From<Vec<Value>> for KeyTuple {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

/// Extracts named values from records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyAccessor {
    keys: Vec<String>,
    case: CaseSensitivity,
}

impl KeyAccessor {
    /// Creates an accessor for the given key names, matching case-insensitively.
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            case: CaseSensitivity::default(),
        }
    }

    /// Sets how key names are matched.
    pub fn case_sensitivity(mut self, case: CaseSensitivity) -> Self {
        self.case = case;
        self
    }

    /// Returns the key names in request order.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the configured matching mode.
    #[inline]
    pub fn sensitivity(&self) -> CaseSensitivity {
        self.case
    }

    /// Retrieves one value per key name, in key order.
    pub fn access<R: Record + ?Sized>(&self, record: &R) -> Result<KeyTuple> {
        let mut values = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            match resolve(record, key, self.case) {
                Some((_, value)) => values.push(value),
                None => return Err(Error::access(format!("{:?}", record), key.as_str())),
            }
        }
        Ok(KeyTuple(values))
    }
}
