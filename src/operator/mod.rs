//! Binary operator table shared by every component

mod errors;
mod table;

pub use errors::OperatorError;
pub use table::{MAX_OPERATORS, Operator, OperatorTable};

#[cfg(test)]
mod tests;
