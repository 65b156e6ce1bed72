use thiserror::Error;

use crate::operator::OperatorError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression must use at least one value")]
    Empty,
    #[error("Expression uses {values} values but has {operations} operations and {shape} shape entries")]
    MismatchedLengths {
        values: usize,
        operations: usize,
        shape: usize,
    },
    #[error("Value order {0:?} is not a permutation")]
    NotAPermutation(Vec<u8>),
    #[error("Shape is not a valid postfix program (at position {position})")]
    MalformedShape { position: usize },
    #[error("Stack underflow at position {position} while evaluating")]
    StackUnderflow { position: usize },
    #[error("Slot {slot} has no value ({available} values supplied)")]
    MissingValue { slot: u8, available: usize },
    #[error("Relabelling slot {slot} needs a mapping longer than {len}")]
    RelabelOutOfRange { slot: u8, len: usize },
    #[error(transparent)]
    Operator(#[from] OperatorError),
}
