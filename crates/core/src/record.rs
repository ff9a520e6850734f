//! Record access for Sift.
//!
//! A record is any input item. The engine reads it through three strategies,
//! tried by key accessors in a fixed order:
//!
//! 1. named-field access (`Record::field`), like attributes of a struct;
//! 2. key-indexed access (`Record::get`), like entries of a mapping;
//! 3. whole-value access (`Record::to_value`), the record itself as a value.
//!
//! Scalars only support the third. `Struct` and `Mapping` are stock shapes for
//! the first two; user types implement `Record` directly.

use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// An input item that can be filtered, grouped and aggregated.
pub trait Record: fmt::Debug {
    /// Returns the named field, or None if the record has no such field.
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Names of all named fields, used for case-insensitive lookups.
    fn field_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Returns the entry indexed by `key`, or None if absent.
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Keys of all indexed entries, used for case-insensitive lookups.
    fn index_keys(&self) -> Vec<&str> {
        Vec::new()
    }

    /// The record as a single value.
    fn to_value(&self) -> Value;
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<&str> {
        (**self).field_names()
    }

    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn index_keys(&self) -> Vec<&str> {
        (**self).index_keys()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl Record for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Record for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

impl Record for i32 {
    fn to_value(&self) -> Value {
        Value::Int64(*self as i64)
    }
}

impl Record for i64 {
    fn to_value(&self) -> Value {
        Value::Int64(*self)
    }
}

impl Record for f64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }
}

impl Record for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Record for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

/// A key-indexed record.
pub type Mapping = BTreeMap<String, Value>;

impl Record for BTreeMap<String, Value> {
    fn get(&self, key: &str) -> Option<Value> {
        BTreeMap::get(self, key).cloned()
    }

    fn index_keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn to_value(&self) -> Value {
        Value::Tuple(
            self.iter()
                .map(|(k, v)| Value::Tuple(alloc::vec![Value::String(k.clone()), v.clone()]))
                .collect(),
        )
    }
}

/// A record with named fields, in declaration order.
#[derive(Clone, PartialEq)]
pub struct Struct {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Struct {
    /// Creates an empty struct record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field, replacing an existing one with the same name.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Returns the type name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }
}

impl fmt::Debug for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

impl Record for Struct {
    fn field(&self, name: &str) -> Option<Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone())
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn to_value(&self) -> Value {
        Value::Tuple(self.fields.iter().map(|(_, v)| v.clone()).collect())
    }
}
