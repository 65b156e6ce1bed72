use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::dedup::DedupError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No stored expressions at {0}")]
    Missing(PathBuf),
    #[error("Stored expressions are corrupt: {0}")]
    Corrupt(String),
    #[error("Store holds expressions over {expected} values, got one over {actual}")]
    WrongSize { expected: usize, actual: usize },
    #[error("Index {index} out of bounds for {len} expressions")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("Deduplication error: {0}")]
    Dedup(#[from] DedupError),
}

impl StoreError {
    /// Whether regenerating the set would fix this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::Io(_) | StoreError::Missing(_) | StoreError::Corrupt(_) | StoreError::Codec(_)
        )
    }
}
