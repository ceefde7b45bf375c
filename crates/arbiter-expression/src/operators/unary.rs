//! Unary operator execution

use crate::error::{ExpressionError, Result};
use arbiter_core::ast::UnaryOperator;
use arbiter_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Negate, Value::Null) => Ok(Value::Null),
        _ => Err(ExpressionError::InvalidOperation(format!(
            "Cannot apply {:?} to {}",
            op,
            operand.type_name()
        ))),
    }
}
