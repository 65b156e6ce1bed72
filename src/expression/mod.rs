//! Canonical RPN expressions: construction, relabelling, evaluation and display

mod ast;
mod display;
mod errors;
mod eval;

pub use ast::Expression;
pub use display::ExpressionDisplay;
pub use errors::ExpressionError;
pub use eval::round_to_digits;

#[cfg(test)]
mod tests;
