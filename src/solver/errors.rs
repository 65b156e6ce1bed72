use thiserror::Error;

use crate::expression::ExpressionError;
use crate::generator::GeneratorError;
use crate::store::StoreError;
use crate::utils::UtilsError;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Target {0} is not a finite number")]
    InvalidTarget(f64),
    #[error("Expression evaluation error: {0}")]
    ExpressionError(#[from] ExpressionError),
    #[error("Utils error: {0}")]
    UtilsError(#[from] UtilsError),
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Generator error: {0}")]
    GeneratorError(#[from] GeneratorError),
}
