use thiserror::Error;

use crate::dedup::DedupError;
use crate::expression::ExpressionError;
use crate::store::StoreError;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Cannot generate expressions over {requested} values (supported: 1..={max})")]
    InvalidSize { requested: usize, max: usize },
    #[error("Split size {split} is invalid for {num_values} values")]
    MalformedSplit { split: usize, num_values: usize },
    #[error("Deduplication error: {0}")]
    Dedup(#[from] DedupError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Expression error: {0}")]
    Expression(#[from] ExpressionError),
    #[error("Utils error: {0}")]
    Utils(#[from] UtilsError),
}
