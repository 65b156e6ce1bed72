use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    #[error("Operator table cannot be empty")]
    EmptyTable,
    #[error("Operator table holds {count} operators, at most {max} are supported")]
    TooManyOperators { count: usize, max: usize },
    #[error("Unknown operator code {0}")]
    UnknownCode(u8),
}
