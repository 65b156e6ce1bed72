use thiserror::Error;

use crate::expression::ExpressionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DedupError {
    #[error("Invalid admission policy: {0}")]
    InvalidPolicy(String),
    #[error("Candidate uses {actual} values, deduplicator expects {expected}")]
    WrongSize { expected: usize, actual: usize },
    #[error("Candidate evaluation failed: {0}")]
    Evaluation(#[from] ExpressionError),
}
