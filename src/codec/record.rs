use log::debug;
use rayon::prelude::*;

use crate::codec::errors::CodecError;
use crate::codec::layout::{RecordLayout, mask, shl, shr};
use crate::codec::packed::PackedRecords;
use crate::codec::permutation::{rank, unrank};
use crate::expression::Expression;
use crate::operator::OperatorTable;

/// Encoder/decoder for expressions over a fixed number of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionCodec {
    layout: RecordLayout,
    table_len: usize,
}

impl ExpressionCodec {
    /// # Errors
    ///
    /// Returns an error if a record for `num_values` slots would not fit one word.
    pub fn new(ops: &OperatorTable, num_values: usize) -> Result<Self, CodecError> {
        let layout = RecordLayout::new(num_values, ops.code_bits())?;
        Ok(Self {
            layout,
            table_len: ops.len(),
        })
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn num_values(&self) -> usize {
        self.layout.num_values
    }

    /// Record width in bits
    pub fn width(&self) -> u32 {
        self.layout.total_bits
    }

    /// # Errors
    ///
    /// Returns an error if the expression has the wrong size, breaks an invariant,
    /// or uses an operator outside the table.
    pub fn encode(&self, expr: &Expression) -> Result<u64, CodecError> {
        let m = self.layout.num_values;
        if expr.num_values() != m {
            return Err(CodecError::SizeMismatch {
                expected: m,
                actual: expr.num_values(),
            });
        }
        expr.validate()?;

        let rank_field = rank(expr.value_order())?;

        let mut operation_field = 0u64;
        for (index, &code) in expr.operations().iter().enumerate() {
            if usize::from(code) >= self.table_len {
                return Err(CodecError::UnknownOperator {
                    code,
                    table_len: self.table_len,
                });
            }
            operation_field |= shl(u64::from(code), index as u32 * self.layout.code_bits);
        }

        let mut shape_field = 0u64;
        for (index, &push) in stored_shape(expr.shape()).iter().enumerate() {
            if push {
                shape_field |= 1 << index;
            }
        }

        Ok(rank_field
            | shl(operation_field, self.layout.rank_bits)
            | shl(
                shape_field,
                self.layout.rank_bits + self.layout.operation_bits,
            ))
    }

    /// # Errors
    ///
    /// Returns an error if the record does not describe a valid expression.
    pub fn decode(&self, record: u64) -> Result<Expression, CodecError> {
        let layout = &self.layout;
        let m = layout.num_values;
        let corrupt = |reason: &str| CodecError::CorruptRecord {
            record,
            reason: reason.to_string(),
        };

        if shr(record, layout.total_bits) != 0 {
            return Err(corrupt("bits set above the record width"));
        }
        if m == 1 {
            return Ok(Expression::operand());
        }

        let value_order = unrank(record & mask(layout.rank_bits), m)
            .map_err(|_| corrupt("value-order rank out of range"))?;

        let operation_field = shr(record, layout.rank_bits) & mask(layout.operation_bits);
        let operations = (0..m - 1)
            .map(|index| {
                let code = shr(operation_field, index as u32 * layout.code_bits)
                    & mask(layout.code_bits);
                // code_bits never exceeds 4 for a valid table
                let code = code as u8;
                if usize::from(code) < self.table_len {
                    Ok(code)
                } else {
                    Err(corrupt("unknown operator code"))
                }
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let shape_field =
            shr(record, layout.rank_bits + layout.operation_bits) & mask(layout.shape_bits);
        let shape = expand_shape(shape_field, m).ok_or_else(|| corrupt("unbalanced shape"))?;

        Expression::new(value_order, operations, shape).map_err(|_| corrupt("invalid shape"))
    }

    /// Encode every expression into a packed array
    ///
    /// # Errors
    ///
    /// Returns the first encoding failure.
    pub fn pack(&self, exprs: &[Expression]) -> Result<PackedRecords, CodecError> {
        let records = exprs
            .par_iter()
            .map(|expr| self.encode(expr))
            .collect::<Result<Vec<u64>, _>>()?;

        let mut packed = PackedRecords::with_capacity(self.width(), records.len())?;
        for record in records {
            packed.push(record)?;
        }
        debug!(
            "Packed {} records of {} bits into {} words",
            packed.len(),
            packed.width(),
            packed.words().len()
        );
        Ok(packed)
    }

    /// Decode every record of a packed array
    ///
    /// # Errors
    ///
    /// Returns an error if the array width disagrees with this codec or a record is corrupt.
    pub fn unpack(&self, packed: &PackedRecords) -> Result<Vec<Expression>, CodecError> {
        self.check_width(packed)?;
        (0..packed.len())
            .into_par_iter()
            .map(|index| self.decode(packed.get(index)?))
            .collect()
    }

    /// Decode a single record of a packed array
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the record is corrupt.
    pub fn get(&self, packed: &PackedRecords, index: usize) -> Result<Expression, CodecError> {
        self.check_width(packed)?;
        self.decode(packed.get(index)?)
    }

    fn check_width(&self, packed: &PackedRecords) -> Result<(), CodecError> {
        if packed.width() == self.width() {
            Ok(())
        } else {
            Err(CodecError::WidthMismatch {
                expected: self.width(),
                actual: packed.width(),
            })
        }
    }
}

/// Shape entries that are actually stored: everything but the first two, the
/// second-to-last and the last
fn stored_shape(shape: &[bool]) -> &[bool] {
    if shape.len() < 5 {
        return &[];
    }
    shape.get(2..shape.len() - 2).unwrap_or(&[])
}

/// Rebuild the full shape for `m >= 2` slots from its stored bits
fn expand_shape(field: u64, m: usize) -> Option<Vec<bool>> {
    let stored = (2 * m).saturating_sub(5);
    let mut shape = Vec::with_capacity(2 * m - 1);
    shape.extend([true, true]);

    let mut pushes = 0;
    for index in 0..stored {
        let push = (field >> index) & 1 == 1;
        pushes += usize::from(push);
        shape.push(push);
    }

    // The interior holds m - 2 pushes in total
    if m >= 3 {
        let needed = m - 2;
        match needed.checked_sub(pushes) {
            Some(0) => shape.push(false),
            Some(1) => shape.push(true),
            _ => return None,
        }
    }
    shape.push(false);
    Some(shape)
}
