use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dedup::errors::DedupError;
use crate::dedup::policy::AdmissionPolicy;
use crate::dedup::truncator::Truncator;
use crate::expression::Expression;
use crate::operator::OperatorTable;

/// Decides whether candidates of one size are new up to numeric equivalence.
///
/// Owned by a single generation run; dropping it releases every seen-set.
#[derive(Debug)]
pub struct Deduplicator {
    num_values: usize,
    policy: AdmissionPolicy,
    ops: OperatorTable,
    truncators: Vec<Truncator>,
    offered: usize,
    admitted: usize,
}

impl Deduplicator {
    /// # Errors
    ///
    /// Returns an error if `policy` is invalid.
    pub fn new(
        num_values: usize,
        policy: AdmissionPolicy,
        ops: OperatorTable,
    ) -> Result<Self, DedupError> {
        policy.validate()?;

        let mut rng = match policy.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let truncators = (0..policy.fingerprints)
            .map(|_| Truncator::random(num_values, &mut rng))
            .collect();

        debug!(
            "Created deduplicator for {} values ({} of {} fingerprints, {} digits)",
            num_values, policy.threshold, policy.fingerprints, policy.rounding_digits
        );

        Self::with_truncators(num_values, policy, ops, truncators)
    }

    /// Build from explicit fingerprint vectors instead of random ones
    ///
    /// # Errors
    ///
    /// Returns an error if `policy` is invalid, the number of truncators differs from
    /// `policy.fingerprints`, or a truncator does not hold exactly `num_values` values.
    pub fn with_truncators(
        num_values: usize,
        policy: AdmissionPolicy,
        ops: OperatorTable,
        truncators: Vec<Truncator>,
    ) -> Result<Self, DedupError> {
        policy.validate()?;
        if truncators.len() != policy.fingerprints {
            return Err(DedupError::InvalidPolicy(format!(
                "{} fingerprint vectors given, policy needs {}",
                truncators.len(),
                policy.fingerprints
            )));
        }
        if let Some(short) = truncators
            .iter()
            .find(|truncator| truncator.values().len() != num_values)
        {
            return Err(DedupError::InvalidPolicy(format!(
                "fingerprint vector has {} values, expected {}",
                short.values().len(),
                num_values
            )));
        }

        Ok(Self {
            num_values,
            policy,
            ops,
            truncators,
            offered: 0,
            admitted: 0,
        })
    }

    /// Offer a candidate; returns whether it was admitted.
    ///
    /// Every truncator records the candidate's value whether or not the candidate
    /// is admitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate has the wrong size or cannot be evaluated.
    pub fn admit(&mut self, candidate: &Expression) -> Result<bool, DedupError> {
        if candidate.num_values() != self.num_values {
            return Err(DedupError::WrongSize {
                expected: self.num_values,
                actual: candidate.num_values(),
            });
        }

        let mut novel = 0;
        for truncator in &mut self.truncators {
            if truncator.observe(candidate, &self.ops, self.policy.rounding_digits)? {
                novel += 1;
            }
        }

        self.offered += 1;
        let admitted = novel >= self.policy.threshold;
        if admitted {
            self.admitted += 1;
        }
        Ok(admitted)
    }

    pub fn num_values(&self) -> usize {
        self.num_values
    }

    pub fn policy(&self) -> &AdmissionPolicy {
        &self.policy
    }

    pub fn truncators(&self) -> &[Truncator] {
        &self.truncators
    }

    /// Candidates offered so far
    pub fn offered(&self) -> usize {
        self.offered
    }

    /// Candidates admitted so far
    pub fn admitted(&self) -> usize {
        self.admitted
    }
}

impl Drop for Deduplicator {
    fn drop(&mut self) {
        if self.offered > 0 {
            info!(
                "Releasing fingerprints for {} values: admitted {} of {} candidates",
                self.num_values, self.admitted, self.offered
            );
        }
    }
}
