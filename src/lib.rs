//! Exprset - enumerate every distinct arithmetic expression over a set of values
//!
//! This library builds, bottom-up, the set of pairwise inequivalent expressions that
//! combine `N` input slots with a small operator table, filters equivalent candidates
//! with randomized numeric fingerprints, and stores the result compactly as fixed-width
//! bit records. A solver then evaluates the finished set against concrete values.

pub mod codec;
pub mod counting;
pub mod dedup;
pub mod expression;
pub mod generator;
pub mod operator;
pub mod solver;
pub mod store;
pub mod utils;

// Re-export the main public API
pub use codec::{CodecError, ExpressionCodec};
pub use dedup::{AdmissionPolicy, DedupError, Deduplicator};
pub use expression::{Expression, ExpressionError};
pub use generator::{ExpressionGenerator, GeneratorConfig, GeneratorError};
pub use operator::{Operator, OperatorError, OperatorTable};
pub use solver::{ExpressionIndex, Solution, Solver, SolverConfig, SolverError};
pub use store::{ExpressionStore, StoreError, StoreKind};
pub use utils::{UtilsError, validate_values};

/// Find expressions combining `values` that evaluate to `target`
///
/// This is a convenience function that generates the expression set for
/// `values.len()` slots with the default operators and policy, then collects up to
/// the default number of solutions.
///
/// # Errors
///
/// This function will return an error if:
/// * `values` is empty, holds a non-finite number, or is too long to enumerate
/// * `target` is not finite
/// * There's an internal error during generation or evaluation
///
/// # Examples
///
/// ```
/// use exprset::find_expressions;
///
/// match find_expressions(&[1.0, 2.0, 3.0], 7.0) {
///     Ok(solutions) => {
///         for solution in solutions {
///             println!("{}", solution);
///         }
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
pub fn find_expressions(values: &[f64], target: f64) -> Result<Vec<Solution>, SolverError> {
    validate_values(values, values.len())?;

    let config = GeneratorConfig::new(values.len());
    let index = ExpressionIndex::generate(&config, OperatorTable::default())?;
    Solver::new(index, SolverConfig::default()).find_all(values, target)
}
