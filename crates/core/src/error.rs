//! Error types for Sift.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// Result type alias for Sift operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for select, group and aggregate operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A key name is neither a named field nor an indexed key of a record.
    Access {
        /// Debug rendering of the offending record.
        record: String,
        key: String,
    },
    /// An aggregate that needs at least one value received an empty group.
    EmptyGroup {
        aggregate: String,
    },
    /// An aggregate received a value of a type it cannot process.
    TypeMismatch {
        aggregate: String,
        expected: &'static str,
        got: Option<DataType>,
    },
    /// Failure raised by a user-supplied aggregate function.
    Aggregate {
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Access { record, key } => {
                write!(f, "{} has no such key or attribute {}", record, key)
            }
            Error::EmptyGroup { aggregate } => {
                write!(f, "{} called on an empty group", aggregate)
            }
            Error::TypeMismatch {
                aggregate,
                expected,
                got,
            } => {
                let got = got.map(|t| t.name()).unwrap_or("null");
                write!(f, "{}: expected {} value, got {}", aggregate, expected, got)
            }
            Error::Aggregate { message } => {
                write!(f, "Aggregate failed: {}", message)
            }
        }
    }
}

impl Error {
    /// Creates an access error.
    pub fn access(record: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Access {
            record: record.into(),
            key: key.into(),
        }
    }

    /// Creates an empty group error.
    pub fn empty_group(aggregate: impl Into<String>) -> Self {
        Error::EmptyGroup {
            aggregate: aggregate.into(),
        }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(
        aggregate: impl Into<String>,
        expected: &'static str,
        got: Option<DataType>,
    ) -> Self {
        Error::TypeMismatch {
            aggregate: aggregate.into(),
            expected,
            got,
        }
    }

    /// Creates a user aggregate error.
    pub fn aggregate(message: impl Into<String>) -> Self {
        Error::Aggregate {
            message: message.into(),
        }
    }
}
