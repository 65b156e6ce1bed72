use crate::dedup::errors::DedupError;

/// Voting rule for admitting a candidate.
///
/// A candidate is admitted when it evaluates to a value not seen before under at
/// least `threshold` of the `fingerprints` random assignments, after rounding to
/// `rounding_digits` decimals. The defaults (2 of 3 at 5 digits) were chosen
/// empirically; they make false merges unlikely, not impossible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdmissionPolicy {
    pub fingerprints: usize,
    pub threshold: usize,
    pub rounding_digits: u32,
    /// Seed for the fingerprint vectors; `None` draws them from the thread RNG
    pub seed: Option<u64>,
}

impl AdmissionPolicy {
    /// # Errors
    ///
    /// Returns an error unless `0 < threshold <= fingerprints`.
    pub fn validate(&self) -> Result<(), DedupError> {
        if self.fingerprints == 0 {
            return Err(DedupError::InvalidPolicy(
                "at least one fingerprint is required".to_string(),
            ));
        }
        if self.threshold == 0 || self.threshold > self.fingerprints {
            return Err(DedupError::InvalidPolicy(format!(
                "threshold {} must be between 1 and {}",
                self.threshold, self.fingerprints
            )));
        }
        Ok(())
    }

    /// Same policy with a different seed
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self {
            fingerprints: 3,
            threshold: 2,
            rounding_digits: 5,
            seed: None,
        }
    }
}
