//! Data type definitions for Sift.
//!
//! This module defines the value types a record field or aggregate result can carry.

/// Supported data types of a `Value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 64-bit signed integer
    Int64,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
    /// Ordered sequence of values
    Tuple,
}

impl DataType {
    /// Returns the lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int64 => "int64",
            DataType::Float64 => "float64",
            DataType::String => "string",
            DataType::Tuple => "tuple",
        }
    }

    /// Returns whether arithmetic aggregates accept this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_equality() {
        assert_eq!(DataType::Int64, DataType::Int64);
        assert_ne!(DataType::Int64, DataType::Float64);
    }

    #[test]
    fn test_numeric_types() {
        assert!(DataType::Int64.is_numeric());
        assert!(DataType::Float64.is_numeric());
        assert!(!DataType::String.is_numeric());
        assert!(!DataType::Tuple.is_numeric());
    }

    #[test]
    fn test_names() {
        assert_eq!(DataType::String.name(), "string");
        assert_eq!(DataType::Tuple.name(), "tuple");
    }
}
