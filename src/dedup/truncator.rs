use std::collections::HashSet;

use rand::Rng;

use crate::expression::{Expression, ExpressionError};
use crate::operator::OperatorTable;

/// Fingerprint values are drawn uniformly from `-FINGERPRINT_RANGE..FINGERPRINT_RANGE`
pub const FINGERPRINT_RANGE: f64 = 10.0;

/// One fingerprint vector and the rounded values it has produced so far
#[derive(Debug, Clone)]
pub struct Truncator {
    values: Vec<f64>,
    seen: HashSet<u64>,
}

impl Truncator {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            seen: HashSet::new(),
        }
    }

    pub fn random<R: Rng>(num_values: usize, rng: &mut R) -> Self {
        let values = (0..num_values)
            .map(|_| rng.random_range(-FINGERPRINT_RANGE..FINGERPRINT_RANGE))
            .collect();
        Self::new(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of distinct values recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Evaluate `expr` under this fingerprint and record the result.
    ///
    /// Returns `true` only when the rounded value is a number this truncator has not
    /// produced before. NaN is never novel and never recorded.
    ///
    /// # Errors
    ///
    /// Propagates evaluation failures of malformed expressions.
    pub fn observe(
        &mut self,
        expr: &Expression,
        ops: &OperatorTable,
        rounding_digits: u32,
    ) -> Result<bool, ExpressionError> {
        let value = expr.evaluate(ops, &self.values, rounding_digits)?;
        if value.is_nan() {
            return Ok(false);
        }
        Ok(self.seen.insert(fingerprint_key(value)))
    }
}

/// Hash key of a rounded value; both zeros share one key
#[inline]
fn fingerprint_key(value: f64) -> u64 {
    if value == 0.0 { 0 } else { value.to_bits() }
}
