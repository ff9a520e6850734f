//! Labeled callables.
//!
//! Grouping needs key names for the output row and aggregation needs a column
//! label. Both are attached here, once, as data next to the callable:
//!
//! - `KeyExtraction` wraps a key function with its ordered key names and
//!   normalizes its result to a `KeyTuple`.
//! - `LabeledAggregate` wraps an aggregate function with its display label.
//!
//! Names of plain function items are read from `core::any::type_name`. That
//! path is best effort; closures have no name and fall back as documented on
//! each constructor. Use the explicit constructors to pin names down.

use crate::access::{KeyAccessor, KeyTuple};
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::any::type_name;
use core::fmt;
use sift_core::{Record, Result, Value};

/// Key name used when a key function has no name of its own.
pub const DEFAULT_KEY: &str = "value";

/// A key function object, optionally carrying key names or a name.
pub trait KeyFunction<R: ?Sized> {
    /// Computes the key; a `Value::Tuple` is a multi-value key.
    fn extract(&self, record: &R) -> Result<Value>;

    /// Ordered key names, if the object carries them.
    fn key_names(&self) -> Option<Vec<String>> {
        None
    }

    /// The object's own name, used as a single key name.
    fn name(&self) -> Option<String> {
        None
    }
}

impl<R: Record + ?Sized> KeyFunction<R> for KeyAccessor {
    fn extract(&self, record: &R) -> Result<Value> {
        Ok(Value::Tuple(self.access(record)?.into_values()))
    }

    fn key_names(&self) -> Option<Vec<String>> {
        Some(self.keys().to_vec())
    }
}

/// An aggregate function object, optionally carrying a display name.
pub trait Aggregator<R: ?Sized> {
    /// Reduces one group's records to a single value.
    fn aggregate(&self, group: &[&R]) -> Result<Value>;

    /// The object's own display name.
    fn name(&self) -> Option<String> {
        None
    }
}

/// Returns the name of a plain function item, or None for closures and
/// other unnamed callables.
pub fn callable_name<F: ?Sized>() -> Option<&'static str> {
    let segment = last_path_segment(type_name::<F>());
    let ident = segment.split('<').next().unwrap_or(segment);
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return None,
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        Some(ident)
    } else {
        None
    }
}

/// Splits a type path on `::` outside of generic brackets.
fn last_path_segment(path: &str) -> &str {
    let bytes = path.as_bytes();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    &path[start..]
}

fn normalize(value: Value) -> KeyTuple {
    match value {
        Value::Tuple(values) => KeyTuple::new(values),
        other => KeyTuple::single(other),
    }
}

type ExtractFn<'f, R> = Box<dyn Fn(&R) -> Result<KeyTuple> + 'f>;

/// A key function together with the key names its tuple is labeled with.
pub struct KeyExtraction<'f, R: ?Sized> {
    keys: Vec<String>,
    extract: ExtractFn<'f, R>,
}

impl<'f, R: ?Sized> KeyExtraction<'f, R> {
    /// Groups by the record's own value, labeled `value`.
    pub fn identity() -> Self
    where
        R: Record,
    {
        Self {
            keys: vec![DEFAULT_KEY.to_string()],
            extract: Box::new(|record: &R| Ok(KeyTuple::single(record.to_value()))),
        }
    }

    /// Groups by named values, reusing the accessor's key names.
    pub fn accessor(accessor: KeyAccessor) -> Self
    where
        R: Record,
    {
        Self {
            keys: accessor.keys().to_vec(),
            extract: Box::new(move |record: &R| accessor.access(record)),
        }
    }

    /// Wraps a function, naming the key after the function item.
    ///
    /// Closures have no name and get `value`.
    pub fn from_fn<F, V>(f: F) -> Self
    where
        F: Fn(&R) -> V + 'f,
        V: Into<Value>,
    {
        let name = callable_name::<F>().unwrap_or(DEFAULT_KEY);
        Self::named(name, f)
    }

    /// Wraps a function under an explicit key name.
    pub fn named<F, V>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&R) -> V + 'f,
        V: Into<Value>,
    {
        Self::with_keys([name], f)
    }

    /// Wraps an unnamed function; the key is labeled `value`.
    pub fn anonymous<F, V>(f: F) -> Self
    where
        F: Fn(&R) -> V + 'f,
        V: Into<Value>,
    {
        Self::named(DEFAULT_KEY, f)
    }

    /// Wraps a function returning one or several values under explicit key names.
    pub fn with_keys<I, S, F, V>(keys: I, f: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&R) -> V + 'f,
        V: Into<Value>,
    {
        Self::fallible(keys, move |record: &R| Ok(f(record).into()))
    }

    /// Wraps a function that can fail, under explicit key names.
    pub fn fallible<I, S, F>(keys: I, f: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&R) -> Result<Value> + 'f,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            extract: Box::new(move |record: &R| f(record).map(normalize)),
        }
    }

    /// Wraps a key function object.
    ///
    /// Key names come from the object's `key_names`, then its `name`, then its
    /// type path.
    pub fn object<K>(function: K) -> Self
    where
        K: KeyFunction<R> + 'f,
    {
        let keys = function
            .key_names()
            .or_else(|| function.name().map(|name| vec![name]))
            .unwrap_or_else(|| vec![type_name::<K>().to_string()]);
        Self {
            keys,
            extract: Box::new(move |record: &R| function.extract(record).map(normalize)),
        }
    }

    /// Returns the key names in order.
    #[inline]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Computes the key tuple of a record.
    pub fn extract(&self, record: &R) -> Result<KeyTuple> {
        (self.extract)(record)
    }
}

impl<R: ?Sized> fmt::Debug for KeyExtraction<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyExtraction")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

type AggregateFn<'f, R> = Box<dyn Fn(&[&R]) -> Result<Value> + 'f>;

/// An aggregate function together with its output column label.
pub struct LabeledAggregate<'f, R: ?Sized> {
    label: String,
    func: AggregateFn<'f, R>,
}

impl<'f, R: ?Sized> LabeledAggregate<'f, R> {
    /// Wraps a function under an explicit label.
    pub fn named<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[&R]) -> Result<Value> + 'f,
    {
        Self {
            label: label.into(),
            func: Box::new(f),
        }
    }

    /// Wraps a function, labeled with the function item's name.
    ///
    /// Closures are labeled with their full type path.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&[&R]) -> Result<Value> + 'f,
    {
        let label = callable_name::<F>().unwrap_or_else(|| type_name::<F>());
        Self::named(label, f)
    }

    /// Wraps an aggregator object, labeled with its name or else its type path.
    pub fn object<A>(aggregator: A) -> Self
    where
        A: Aggregator<R> + 'f,
    {
        let label = aggregator
            .name()
            .unwrap_or_else(|| type_name::<A>().to_string());
        Self::named(label, move |group: &[&R]| aggregator.aggregate(group))
    }

    /// Returns the output column label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Forwards a group to the wrapped function.
    pub fn call(&self, group: &[&R]) -> Result<Value> {
        (self.func)(group)
    }
}

impl<R: ?Sized> fmt::Debug for LabeledAggregate<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabeledAggregate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
