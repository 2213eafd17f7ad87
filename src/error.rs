#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CalcError {
    #[error("insufficient items on the stack")]
    StackUnderflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("undefined operation: {0}")]
    UndefinedOperation(String),
    #[error("malformed word definition: {0}")]
    InvalidDefinition(String),
    #[error("word recursion limit exceeded")]
    RecursionLimit,
}
