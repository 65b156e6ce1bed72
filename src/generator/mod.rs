//! Bottom-up enumeration of canonical expressions from splits of smaller sets

mod config;
pub mod constants;
mod core;
mod errors;

pub use config::GeneratorConfig;
pub use constants::MAX_GENERATED_VALUES;
pub use self::core::{ExpressionGenerator, split_sizes};
pub use errors::GeneratorError;
