use thiserror::Error;

/// Errors that can occur in utility functions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    #[error("Expected {expected} values, got {actual}")]
    WrongValueCount { expected: usize, actual: usize },
    #[error("Value at position {position} is not finite: {value}")]
    NonFiniteValue { position: usize, value: f64 },
    #[error("Cannot choose {size} of {total} slots")]
    InvalidCombination { total: usize, size: usize },
}
