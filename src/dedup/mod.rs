//! Probabilistic equivalence filter built on random numeric fingerprints

mod core;
mod errors;
mod policy;
mod truncator;

pub use self::core::Deduplicator;
pub use errors::DedupError;
pub use policy::AdmissionPolicy;
pub use truncator::Truncator;
