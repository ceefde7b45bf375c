//! Binary operator execution

use crate::error::{ExpressionError, Result};
use arbiter_core::ast::Operator;
use arbiter_core::Value;

/// Execute an arithmetic, string or membership operation
pub(crate) fn execute_binary_op(left: &Value, op: &Operator, right: &Value) -> Result<Value> {
    // Null in arithmetic propagates so missing fields do not abort a rule
    if op.is_arithmetic() && (left.is_null() || right.is_null()) {
        tracing::debug!(
            "Null in binary operation: {:?} {:?} {:?}, returning Null",
            left,
            op,
            right
        );
        return Ok(Value::Null);
    }

    match (left, op, right) {
        // Arithmetic operations
        (Value::Number(l), Operator::Add, Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Number(l), Operator::Sub, Value::Number(r)) => Ok(Value::Number(l - r)),
        (Value::Number(l), Operator::Mul, Value::Number(r)) => Ok(Value::Number(l * r)),
        (Value::Number(l), Operator::Div, Value::Number(r)) => {
            if *r == 0.0 {
                Err(ExpressionError::DivisionByZero)
            } else {
                Ok(Value::Number(l / r))
            }
        }
        (Value::Number(l), Operator::Mod, Value::Number(r)) => {
            if *r == 0.0 {
                Err(ExpressionError::DivisionByZero)
            } else {
                Ok(Value::Number(l % r))
            }
        }

        // String concatenation
        (Value::String(l), Operator::Add, Value::String(r)) => {
            Ok(Value::String(format!("{}{}", l, r)))
        }

        // String operations
        (Value::String(l), Operator::Contains, Value::String(r)) => {
            Ok(Value::Bool(l.contains(r.as_str())))
        }
        (Value::String(l), Operator::StartsWith, Value::String(r)) => {
            Ok(Value::Bool(l.starts_with(r.as_str())))
        }
        (Value::String(l), Operator::EndsWith, Value::String(r)) => {
            Ok(Value::Bool(l.ends_with(r.as_str())))
        }

        // Array operations
        (Value::Array(arr), Operator::Contains, val) => {
            Ok(Value::Bool(arr.iter().any(|v| v == val)))
        }

        // In operator
        (val, Operator::In, Value::Array(arr)) => Ok(Value::Bool(arr.iter().any(|v| v == val))),
        (val, Operator::NotIn, Value::Array(arr)) => {
            Ok(Value::Bool(!arr.iter().any(|v| v == val)))
        }
        (Value::String(needle), Operator::In, Value::String(haystack)) => {
            Ok(Value::Bool(haystack.contains(needle.as_str())))
        }

        _ => Err(ExpressionError::InvalidOperation(format!(
            "Cannot apply {} to {} and {}",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))),
    }
}
