//! Sift Core - Core types for the Sift in-memory query helper.
//!
//! This crate provides the foundational types shared by the query engine:
//!
//! - `DataType`: Supported value types (Boolean, Int64, Float64, String, Tuple)
//! - `Value`: Dynamically typed values used as group keys and aggregate results
//! - `Record`: Uniform access to input items (named fields, indexed keys, whole value)
//! - `Struct`, `Mapping`: Stock record shapes
//! - `Row`: An insertion-ordered label/value output row
//! - `Error`: Error types for select, group and aggregate operations
//!
//! # Example
//!
//! ```rust
//! use sift_core::{Record, Row, Struct, Value};
//!
//! let dev = Struct::new("Developer")
//!     .with("name", "John")
//!     .with("level", "senior");
//! assert_eq!(dev.field("level"), Some(Value::from("senior")));
//!
//! let mut row = Row::new();
//! row.insert("level", "senior");
//! row.insert("len", 3i64);
//! assert_eq!(row.get("len"), Some(&Value::Int64(3)));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod record;
mod row;
mod types;
mod value;

pub use error::{Error, Result};
pub use record::{Mapping, Record, Struct};
pub use row::Row;
pub use types::DataType;
pub use value::Value;
