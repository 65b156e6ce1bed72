use log::info;

use crate::codec::{ExpressionCodec, PackedRecords};
use crate::expression::Expression;
use crate::operator::OperatorTable;
use crate::store::errors::StoreError;
use crate::store::packed::PackedStore;
use crate::store::traits::{ExpressionStore, WordStore};

/// Packed expressions mirrored to a [`WordStore`] on [`flush`](ExpressionStore::flush)
#[derive(Debug)]
pub struct ExternalStore<W: WordStore> {
    buffer: PackedStore,
    backend: W,
    flushed: usize,
}

impl<W: WordStore> ExternalStore<W> {
    /// Start an empty set that will be written to `backend`
    ///
    /// # Errors
    ///
    /// Returns an error if `num_values` is too large for a single-word record.
    pub fn create(ops: &OperatorTable, num_values: usize, backend: W) -> Result<Self, StoreError> {
        Ok(Self::from_parts(PackedStore::new(ops, num_values)?, backend))
    }

    /// Open the set previously written to `backend`
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored or the stored words are corrupt.
    pub fn open(ops: &OperatorTable, num_values: usize, backend: W) -> Result<Self, StoreError> {
        let buffer = Self::load(ops, num_values, &backend)?;
        Ok(Self::from_parts(buffer, backend))
    }

    /// Read and fully validate the set stored in `backend`
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored, the stored set is empty, or any record
    /// fails to decode.
    pub fn load(
        ops: &OperatorTable,
        num_values: usize,
        backend: &W,
    ) -> Result<PackedStore, StoreError> {
        let codec = ExpressionCodec::new(ops, num_values)?;
        let (words, records) = backend.read_words()?;
        // Every size has at least one expression
        if records == 0 {
            return Err(StoreError::Corrupt(format!(
                "stored set over {} values is empty",
                num_values
            )));
        }
        let packed = PackedRecords::from_words(words, codec.width(), records)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        codec
            .unpack(&packed)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        info!(
            "Loaded {} stored expressions over {} values",
            packed.len(),
            num_values
        );
        PackedStore::from_records(codec, packed)
    }

    /// Pair a buffer with the backend it was loaded from; its records count as flushed
    pub fn from_parts(buffer: PackedStore, backend: W) -> Self {
        let flushed = buffer.len();
        Self {
            buffer,
            backend,
            flushed,
        }
    }

    pub fn backend(&self) -> &W {
        &self.backend
    }

    pub fn into_backend(self) -> W {
        self.backend
    }

    /// Whether records were pushed since the last flush
    pub fn is_dirty(&self) -> bool {
        self.flushed != self.buffer.len()
    }
}

impl<W: WordStore> ExpressionStore for ExternalStore<W> {
    fn num_values(&self) -> usize {
        self.buffer.num_values()
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn get(&self, index: usize) -> Result<Expression, StoreError> {
        self.buffer.get(index)
    }

    fn push(&mut self, expr: Expression) -> Result<(), StoreError> {
        self.buffer.push(expr)
    }

    fn to_vec(&self) -> Result<Vec<Expression>, StoreError> {
        self.buffer.to_vec()
    }

    fn packed(&self) -> Option<&PackedRecords> {
        self.buffer.packed()
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.is_dirty() {
            return Ok(());
        }
        let records = self.buffer.records();
        self.backend.write_words(records.words(), records.len())?;
        self.flushed = records.len();
        Ok(())
    }
}
