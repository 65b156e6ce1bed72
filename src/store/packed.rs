use crate::codec::{ExpressionCodec, PackedRecords};
use crate::expression::Expression;
use crate::operator::OperatorTable;
use crate::store::errors::StoreError;
use crate::store::traits::ExpressionStore;

/// Expressions held as bit-packed codec records, decoded on access
#[derive(Debug, Clone)]
pub struct PackedStore {
    codec: ExpressionCodec,
    records: PackedRecords,
}

impl PackedStore {
    /// # Errors
    ///
    /// Returns an error if `num_values` is too large for a single-word record.
    pub fn new(ops: &OperatorTable, num_values: usize) -> Result<Self, StoreError> {
        Self::with_capacity(ops, num_values, 0)
    }

    /// Empty store with words reserved for `capacity` records
    ///
    /// # Errors
    ///
    /// Returns an error if `num_values` is too large for a single-word record.
    pub fn with_capacity(
        ops: &OperatorTable,
        num_values: usize,
        capacity: usize,
    ) -> Result<Self, StoreError> {
        let codec = ExpressionCodec::new(ops, num_values)?;
        let records = PackedRecords::with_capacity(codec.width(), capacity)?;
        Ok(Self { codec, records })
    }

    /// Wrap records produced elsewhere, e.g. read back from a word store
    ///
    /// # Errors
    ///
    /// Returns an error if the records were packed at a different width.
    pub fn from_records(codec: ExpressionCodec, records: PackedRecords) -> Result<Self, StoreError> {
        if records.width() != codec.width() {
            return Err(StoreError::Corrupt(format!(
                "records are {} bits wide, expected {}",
                records.width(),
                codec.width()
            )));
        }
        Ok(Self { codec, records })
    }

    pub fn codec(&self) -> &ExpressionCodec {
        &self.codec
    }

    pub fn records(&self) -> &PackedRecords {
        &self.records
    }
}

impl ExpressionStore for PackedStore {
    fn num_values(&self) -> usize {
        self.codec.num_values()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn get(&self, index: usize) -> Result<Expression, StoreError> {
        Ok(self.codec.get(&self.records, index)?)
    }

    fn push(&mut self, expr: Expression) -> Result<(), StoreError> {
        if expr.num_values() != self.num_values() {
            return Err(StoreError::WrongSize {
                expected: self.num_values(),
                actual: expr.num_values(),
            });
        }
        let record = self.codec.encode(&expr)?;
        self.records.push(record)?;
        Ok(())
    }

    fn to_vec(&self) -> Result<Vec<Expression>, StoreError> {
        Ok(self.codec.unpack(&self.records)?)
    }

    fn packed(&self) -> Option<&PackedRecords> {
        Some(&self.records)
    }
}
