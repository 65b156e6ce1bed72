use crate::solver::constants::{EVALUATION_ROUNDING_DIGITS, MAX_SOLUTIONS, TOLERANCE};

/// Configuration for matching expressions against a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub rounding_digits: u32,
    pub max_solutions: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: TOLERANCE,
            rounding_digits: EVALUATION_ROUNDING_DIGITS,
            max_solutions: MAX_SOLUTIONS,
        }
    }
}
