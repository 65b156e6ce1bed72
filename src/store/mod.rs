//! Append-only expression storage with interchangeable backends

mod errors;
mod external;
mod memory;
mod packed;
mod set;
mod traits;
mod words;

use std::path::PathBuf;

pub use errors::StoreError;
pub use external::ExternalStore;
pub use memory::MemoryStore;
pub use packed::PackedStore;
pub use set::ExpressionSet;
pub use traits::{ExpressionStore, WordStore};
pub use words::{FileWordStore, MemoryWordStore};

use crate::operator::OperatorTable;

/// Which backend holds a set of expressions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreKind {
    /// Decoded expressions in a vector
    #[default]
    Memory,
    /// Bit-packed codec records
    Packed,
    /// Bit-packed records written to files under the given directory
    External(PathBuf),
}

/// Build an empty store of the given kind with room for `capacity` expressions
///
/// # Errors
///
/// Returns an error if a packed backend cannot encode `num_values` values.
pub fn build_store(
    kind: &StoreKind,
    ops: &OperatorTable,
    num_values: usize,
    capacity: usize,
) -> Result<Box<dyn ExpressionStore>, StoreError> {
    Ok(match kind {
        StoreKind::Memory => Box::new(MemoryStore::with_capacity(num_values, capacity)),
        StoreKind::Packed => Box::new(PackedStore::with_capacity(ops, num_values, capacity)?),
        StoreKind::External(dir) => Box::new(ExternalStore::from_parts(
            PackedStore::with_capacity(ops, num_values, capacity)?,
            FileWordStore::new(dir.clone(), num_values),
        )),
    })
}
