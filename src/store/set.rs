use log::debug;

use crate::dedup::Deduplicator;
use crate::expression::Expression;
use crate::store::errors::StoreError;
use crate::store::traits::ExpressionStore;

/// A store that only accepts expressions its deduplicator admits
#[derive(Debug)]
pub struct ExpressionSet {
    store: Box<dyn ExpressionStore>,
    dedup: Deduplicator,
}

impl ExpressionSet {
    /// # Errors
    ///
    /// Returns an error if the store and deduplicator disagree on the number of values.
    pub fn new(store: Box<dyn ExpressionStore>, dedup: Deduplicator) -> Result<Self, StoreError> {
        if store.num_values() != dedup.num_values() {
            return Err(StoreError::WrongSize {
                expected: store.num_values(),
                actual: dedup.num_values(),
            });
        }
        Ok(Self { store, dedup })
    }

    /// Store `candidate` if it is new up to numeric equivalence
    ///
    /// # Errors
    ///
    /// Returns an error if the candidate cannot be evaluated or stored.
    pub fn admit(&mut self, candidate: Expression) -> Result<bool, StoreError> {
        if !self.dedup.admit(&candidate)? {
            return Ok(false);
        }
        self.store.push(candidate)?;
        Ok(true)
    }

    pub fn num_values(&self) -> usize {
        self.store.num_values()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &dyn ExpressionStore {
        self.store.as_ref()
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.dedup
    }

    /// Release the fingerprint seen-sets, flush the store and hand it back
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the store fails.
    pub fn finish(self) -> Result<Box<dyn ExpressionStore>, StoreError> {
        let Self { mut store, dedup } = self;
        drop(dedup);
        store.flush()?;
        debug!(
            "Finished set of {} expressions over {} values",
            store.len(),
            store.num_values()
        );
        Ok(store)
    }
}
