use std::fmt;

use crate::codec::PackedRecords;
use crate::expression::Expression;
use crate::store::errors::StoreError;

/// Append-only collection of expressions over a fixed number of slots
pub trait ExpressionStore: Send + Sync + fmt::Debug {
    fn num_values(&self) -> usize;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the stored record is corrupt.
    fn get(&self, index: usize) -> Result<Expression, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the expression has the wrong size or cannot be stored.
    fn push(&mut self, expr: Expression) -> Result<(), StoreError>;

    /// Every stored expression, in insertion order
    fn to_vec(&self) -> Result<Vec<Expression>, StoreError> {
        (0..self.len()).map(|index| self.get(index)).collect()
    }

    /// Packed form of the stored records, if the backend keeps one
    fn packed(&self) -> Option<&PackedRecords> {
        None
    }

    /// Persist buffered records; a no-op for in-memory backends
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Backing storage for packed words.
///
/// The payload carries no header: the record count travels next to the words and the
/// record width is re-derived from the number of values.
pub trait WordStore: Send + Sync + fmt::Debug {
    /// Replace the stored words with `words`, holding `records` records
    fn write_words(&mut self, words: &[u64], records: usize) -> Result<(), StoreError>;

    /// The words and record count last written
    fn read_words(&self) -> Result<(Vec<u64>, usize), StoreError>;
}
