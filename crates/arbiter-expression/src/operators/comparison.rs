//! Comparison operator execution

use crate::error::{ExpressionError, Result};
use arbiter_core::ast::Operator;
use arbiter_core::Value;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    match op {
        // Equality is structural and defined for every pair of values
        Operator::Eq => return Ok(left == right),
        Operator::Ne => return Ok(left != right),
        _ => {}
    }

    // Ordering against a missing value is never satisfied
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null comparison: {:?} {:?} {:?}, returning false",
            left,
            op,
            right
        );
        return Ok(false);
    }

    match (left, op, right) {
        (Value::Number(l), Operator::Gt, Value::Number(r)) => Ok(l > r),
        (Value::Number(l), Operator::Ge, Value::Number(r)) => Ok(l >= r),
        (Value::Number(l), Operator::Lt, Value::Number(r)) => Ok(l < r),
        (Value::Number(l), Operator::Le, Value::Number(r)) => Ok(l <= r),

        (Value::String(l), Operator::Gt, Value::String(r)) => Ok(l > r),
        (Value::String(l), Operator::Ge, Value::String(r)) => Ok(l >= r),
        (Value::String(l), Operator::Lt, Value::String(r)) => Ok(l < r),
        (Value::String(l), Operator::Le, Value::String(r)) => Ok(l <= r),

        _ => Err(ExpressionError::InvalidOperation(format!(
            "Cannot compare {} and {} with {}",
            left.type_name(),
            right.type_name(),
            op.symbol()
        ))),
    }
}
