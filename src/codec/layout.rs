use log::debug;

use crate::codec::errors::CodecError;
use crate::codec::permutation::{MAX_PERMUTATION_LEN, factorial};

/// Bits per storage word
pub const WORD_BITS: u32 = u64::BITS;

/// Bit widths of one record, computed once per slot count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub num_values: usize,
    /// `ceil(log2 m!)`
    pub rank_bits: u32,
    pub code_bits: u32,
    /// `code_bits * (m - 1)`
    pub operation_bits: u32,
    /// `max(2m - 5, 0)`
    pub shape_bits: u32,
    pub total_bits: u32,
}

impl RecordLayout {
    /// # Errors
    ///
    /// Returns an error if `num_values` is zero or a record would not fit one word.
    pub fn new(num_values: usize, code_bits: u32) -> Result<Self, CodecError> {
        if num_values == 0 {
            return Err(CodecError::NoValues);
        }
        if num_values > MAX_PERMUTATION_LEN {
            return Err(CodecError::CapacityExceeded {
                num_values,
                bits: u32::MAX,
            });
        }

        let permutations = factorial(num_values);
        let rank_bits = if permutations <= 1 {
            0
        } else {
            u64::BITS - (permutations - 1).leading_zeros()
        };
        // num_values <= MAX_PERMUTATION_LEN keeps these small
        let m = num_values as u32;
        let operation_bits = code_bits * (m - 1);
        let shape_bits = (2 * m).saturating_sub(5);
        let total_bits = rank_bits + operation_bits + shape_bits;

        if total_bits > WORD_BITS {
            return Err(CodecError::CapacityExceeded {
                num_values,
                bits: total_bits,
            });
        }

        debug!(
            "Record layout for {} values: {} rank + {} operation + {} shape = {} bits",
            num_values, rank_bits, operation_bits, shape_bits, total_bits
        );

        Ok(Self {
            num_values,
            rank_bits,
            code_bits,
            operation_bits,
            shape_bits,
            total_bits,
        })
    }

    /// Words needed to hold `records` packed records
    pub fn words_for(&self, records: usize) -> usize {
        words_for(records, self.total_bits)
    }
}

pub(crate) fn words_for(records: usize, width: u32) -> usize {
    (records * width as usize).div_ceil(WORD_BITS as usize)
}

/// Low `bits` bits set
#[inline]
pub(crate) fn mask(bits: u32) -> u64 {
    if bits >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Shift that yields zero instead of overflowing
#[inline]
pub(crate) fn shl(value: u64, shift: u32) -> u64 {
    value.checked_shl(shift).unwrap_or(0)
}

/// Shift that yields zero instead of overflowing
#[inline]
pub(crate) fn shr(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}
