// Configuration constants for the solver module

/// Largest difference between a value and the target that still counts as a match
pub const TOLERANCE: f64 = 1e-5;
/// Decimal places kept when evaluating against real inputs
pub const EVALUATION_ROUNDING_DIGITS: u32 = 7;
/// Matches collected by `find_all` before further ones are dropped
pub const MAX_SOLUTIONS: usize = 200;
/// Evaluations between progress log lines
pub const PROGRESS_LOG_INTERVAL: usize = 1_000_000;
