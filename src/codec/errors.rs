use thiserror::Error;

use crate::expression::ExpressionError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Records need at least one value")]
    NoValues,
    #[error("{num_values} values need {bits} bits per record, more than one 64-bit word")]
    CapacityExceeded { num_values: usize, bits: u32 },
    #[error("Codec is built for {expected} values, expression has {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Operator code {code} is outside a table of {table_len} operators")]
    UnknownOperator { code: u8, table_len: usize },
    #[error("{0:?} is not a permutation")]
    InvalidPermutation(Vec<u8>),
    #[error("Rank {rank} is out of range for permutations of {len} values")]
    RankOutOfRange { rank: u64, len: usize },
    #[error("Record {record:#x} is corrupt: {reason}")]
    CorruptRecord { record: u64, reason: String },
    #[error("Value {value:#x} does not fit in {width} bits")]
    ValueTooWide { value: u64, width: u32 },
    #[error("Record index {index} out of bounds for {len} records")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Packed records are {actual} bits wide, codec expects {expected}")]
    WidthMismatch { expected: u32, actual: u32 },
    #[error("Expected {expected} words for the packed records, got {actual}")]
    WordCount { expected: usize, actual: usize },
    #[error("Malformed expression: {0}")]
    Malformed(#[from] ExpressionError),
}
