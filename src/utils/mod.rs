//! Utils module split into submodules

mod combinations;
mod errors;
mod validation;

pub use combinations::{Combinations, binomial, complement};
pub use errors::UtilsError;
pub use validation::validate_values;
