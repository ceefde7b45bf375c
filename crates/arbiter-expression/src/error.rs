//! Expression error types

use arbiter_core::CoreError;
use thiserror::Error;

/// Expression error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// The expression text could not be tokenized or parsed
    #[error("Invalid expression syntax: {0}")]
    Syntax(String),

    /// The expression failed validation against allowed names
    #[error("Invalid expression \"{expression}\": {reason}")]
    InvalidExpression { expression: String, reason: String },

    /// A variable is not bound
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// A called function is not registered
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),

    /// Operator applied to unsupported operands
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// A registered function rejected its arguments
    #[error("Function '{name}' failed: {message}")]
    Function { name: String, message: String },

    /// Value conversion error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for expression operations
pub type Result<T> = std::result::Result<T, ExpressionError>;
