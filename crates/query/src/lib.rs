//! Sift Query - Filter, group and aggregate engine for in-memory records.
//!
//! This crate provides:
//!
//! - `access`: Uniform key access over records (`KeyAccessor`, `KeyTuple`)
//! - `label`: Callables labeled for output (`KeyExtraction`, `LabeledAggregate`)
//! - `group`: Insertion-ordered grouping by key tuple
//! - `aggregate`: One output row per group
//! - `predicate`, `filter`: Record predicates and the filter pass
//! - `functions`: Stock aggregates (`len`, `max`, `min`, `sum`, `mean`, `MostPopularValue`)
//! - `select`: The pipeline composing filter, group and aggregate
//!
//! Everything is synchronous and in memory; no call mutates its input.

#![no_std]

extern crate alloc;

pub mod access;
pub mod aggregate;
pub mod filter;
pub mod functions;
pub mod group;
pub mod label;
pub mod predicate;
pub mod select;

pub use access::{Access, CaseSensitivity, KeyAccessor, KeyTuple};
pub use aggregate::AggregateExecutor;
pub use filter::FilterExecutor;
pub use functions::{MostPopularValue, TieBreak};
pub use group::{Group, Groups};
pub use label::{Aggregator, KeyExtraction, KeyFunction, LabeledAggregate, DEFAULT_KEY};
pub use predicate::{EvalType, Predicate, ValuePredicate};
pub use select::{select, Select, Selection};
