pub mod constants;
mod config;
mod core;
mod errors;
mod index;
mod solution;

pub use self::core::Solver;
pub use config::SolverConfig;
pub use errors::SolverError;
pub use index::ExpressionIndex;
pub use solution::Solution;
