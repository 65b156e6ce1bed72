//! Fixed-width binary encoding of canonical expressions.
//!
//! A record for an expression over `m` slots is laid out, from the least significant
//! bit upwards, as
//!
//! ```text
//! [ value-order rank | operation codes | interior shape bits ]
//! ```
//!
//! - The value order is stored as its Lehmer rank in `0..m!`, using `ceil(log2 m!)` bits.
//! - Each of the `m - 1` operation codes takes the operator table's code width.
//! - The shape always starts `true, true` and ends `false`, and its interior holds
//!   exactly `m - 2` pushes, so its second-to-last entry follows from the rest. Only
//!   the remaining `max(2m - 5, 0)` entries are stored.
//!
//! Records are packed back to back into 64-bit words with no padding.

mod errors;
mod layout;
mod packed;
mod permutation;
mod record;

pub use errors::CodecError;
pub use layout::{RecordLayout, WORD_BITS};
pub use packed::PackedRecords;
pub use permutation::{MAX_PERMUTATION_LEN, factorial, rank, unrank};
pub use record::ExpressionCodec;

#[cfg(test)]
mod tests;
