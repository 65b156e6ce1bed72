use crate::codec::errors::CodecError;
use crate::codec::layout::{WORD_BITS, mask, shl, shr, words_for};

/// Fixed-width records packed back to back in 64-bit words.
///
/// Record `i` occupies bits `i * width .. (i + 1) * width` of the word array, counting
/// from the least significant bit of word 0; a record may straddle two words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRecords {
    words: Vec<u64>,
    width: u32,
    len: usize,
}

impl PackedRecords {
    /// # Errors
    ///
    /// Returns an error if `width` exceeds one word.
    pub fn new(width: u32) -> Result<Self, CodecError> {
        Self::with_capacity(width, 0)
    }

    /// # Errors
    ///
    /// Returns an error if `width` exceeds one word.
    pub fn with_capacity(width: u32, records: usize) -> Result<Self, CodecError> {
        if width > WORD_BITS {
            return Err(CodecError::CapacityExceeded {
                num_values: 0,
                bits: width,
            });
        }
        Ok(Self {
            words: Vec::with_capacity(words_for(records, width)),
            width,
            len: 0,
        })
    }

    /// Reinterpret a word array produced by [`PackedRecords::into_words`].
    ///
    /// # Errors
    ///
    /// Returns an error if the word count does not match `len` records of `width` bits.
    pub fn from_words(words: Vec<u64>, width: u32, len: usize) -> Result<Self, CodecError> {
        if width > WORD_BITS {
            return Err(CodecError::CapacityExceeded {
                num_values: 0,
                bits: width,
            });
        }
        let expected = words_for(len, width);
        if words.len() != expected {
            return Err(CodecError::WordCount {
                expected,
                actual: words.len(),
            });
        }
        Ok(Self { words, width, len })
    }

    /// # Errors
    ///
    /// Returns an error if `index >= len`.
    pub fn get(&self, index: usize) -> Result<u64, CodecError> {
        if index >= self.len {
            return Err(CodecError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        if self.width == 0 {
            return Ok(0);
        }

        let bit = index * self.width as usize;
        let word = bit / WORD_BITS as usize;
        let offset = (bit % WORD_BITS as usize) as u32;

        let low = self.words.get(word).copied().unwrap_or_default();
        let mut value = shr(low, offset);
        if offset + self.width > WORD_BITS {
            let high = self.words.get(word + 1).copied().unwrap_or_default();
            value |= shl(high, WORD_BITS - offset);
        }
        Ok(value & mask(self.width))
    }

    /// Overwrite record `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index >= len` or `value` needs more than `width` bits.
    pub fn set(&mut self, index: usize, value: u64) -> Result<(), CodecError> {
        if index >= self.len {
            return Err(CodecError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        if value & !mask(self.width) != 0 {
            return Err(CodecError::ValueTooWide {
                value,
                width: self.width,
            });
        }
        if self.width == 0 {
            return Ok(());
        }

        let bit = index * self.width as usize;
        let word = bit / WORD_BITS as usize;
        let offset = (bit % WORD_BITS as usize) as u32;
        let field = mask(self.width);

        if let Some(low) = self.words.get_mut(word) {
            *low = (*low & !shl(field, offset)) | shl(value, offset);
        }
        if offset + self.width > WORD_BITS {
            let spill = offset + self.width - WORD_BITS;
            if let Some(high) = self.words.get_mut(word + 1) {
                *high = (*high & !mask(spill)) | shr(value, WORD_BITS - offset);
            }
        }
        Ok(())
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` needs more than `width` bits.
    pub fn push(&mut self, value: u64) -> Result<(), CodecError> {
        if value & !mask(self.width) != 0 {
            return Err(CodecError::ValueTooWide {
                value,
                width: self.width,
            });
        }
        self.len += 1;
        self.words.resize(words_for(self.len, self.width), 0);
        self.set(self.len - 1, value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Record width in bits
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Words reserved for records
    pub fn capacity(&self) -> usize {
        self.words.capacity()
    }

    pub fn into_words(self) -> Vec<u64> {
        self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.len).map(|index| self.get(index).unwrap_or_default())
    }
}
