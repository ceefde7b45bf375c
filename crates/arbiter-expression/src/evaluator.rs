//! Expression evaluator
//!
//! Walks an `Expression` tree against a set of variable bindings and the
//! registered functions.

use crate::error::{ExpressionError, Result};
use crate::function::{FunctionRegistry, Variables};
use crate::operators::{execute_binary_op, execute_compare, execute_unary_op};
use arbiter_core::ast::{Expression, Operator};
use arbiter_core::Value;

/// Evaluates parsed expressions
pub struct Evaluator<'a> {
    variables: &'a Variables,
    functions: &'a FunctionRegistry,
}

impl<'a> Evaluator<'a> {
    pub fn new(variables: &'a Variables, functions: &'a FunctionRegistry) -> Self {
        Self {
            variables,
            functions,
        }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => Ok(value.clone()),

            Expression::FieldAccess(path) => self.resolve(path),

            Expression::Array(items) => {
                let values = items
                    .iter()
                    .map(|item| self.evaluate(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(values))
            }

            Expression::Binary { left, op, right } => self.evaluate_binary(left, op, right),

            Expression::Unary { op, operand } => {
                let value = self.evaluate(operand)?;
                execute_unary_op(&value, op)
            }

            Expression::FunctionCall { name, args } => {
                let function = self
                    .functions
                    .get(name)
                    .ok_or_else(|| ExpressionError::UndefinedFunction(name.clone()))?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>>>()?;
                function.call(self.variables, &args)
            }

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(true_expr)
                } else {
                    self.evaluate(false_expr)
                }
            }
        }
    }

    /// The root variable must be bound; missing nested fields read as null
    fn resolve(&self, path: &[String]) -> Result<Value> {
        let (root, rest) = path
            .split_first()
            .ok_or_else(|| ExpressionError::Syntax("empty field path".to_string()))?;

        let value = self
            .variables
            .get(root)
            .ok_or_else(|| ExpressionError::UndefinedVariable(root.clone()))?;

        Ok(value.lookup(rest))
    }

    fn evaluate_binary(
        &self,
        left: &Expression,
        op: &Operator,
        right: &Expression,
    ) -> Result<Value> {
        let left = self.evaluate(left)?;

        // Short-circuit logical operators
        match op {
            Operator::And if !left.is_truthy() => return Ok(Value::Bool(false)),
            Operator::Or if left.is_truthy() => return Ok(Value::Bool(true)),
            Operator::And | Operator::Or => {
                let right = self.evaluate(right)?;
                return Ok(Value::Bool(right.is_truthy()));
            }
            _ => {}
        }

        let right = self.evaluate(right)?;

        if op.is_comparison() {
            execute_compare(&left, op, &right).map(Value::Bool)
        } else {
            execute_binary_op(&left, op, &right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::ExpressionFunction;
    use crate::parser::ExpressionParser;

    fn eval(source: &str, variables: &Variables) -> Result<Value> {
        let mut functions = FunctionRegistry::new();
        functions.add(ExpressionFunction::new("count", |_, args| {
            Ok(Value::Number(args.len() as f64))
        }));
        let expr = ExpressionParser::parse(source)?;
        Evaluator::new(variables, &functions).evaluate(&expr)
    }

    fn vars() -> Variables {
        let json = serde_json::json!({
            "value": 5,
            "user": {"name": "alice", "tags": ["vip", "beta"]},
            "active": true
        });
        match Value::from(json) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_arithmetic_with_variables() {
        assert_eq!(eval("value * 2 + 1", &vars()).unwrap(), Value::Number(11.0));
        assert_eq!(eval("(value + 5) / 2", &vars()).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_nested_field_access() {
        assert_eq!(eval("user.name", &vars()).unwrap(), Value::from("alice"));
        assert_eq!(eval("user.email", &vars()).unwrap(), Value::Null);
    }

    #[test]
    fn test_undefined_root_variable() {
        let err = eval("missing + 1", &vars()).unwrap_err();
        assert_eq!(err, ExpressionError::UndefinedVariable("missing".to_string()));
    }

    #[test]
    fn test_logical_short_circuit() {
        // The right side would fail if evaluated
        assert_eq!(eval("false && missing", &vars()).unwrap(), Value::Bool(false));
        assert_eq!(eval("active || missing", &vars()).unwrap(), Value::Bool(true));
        assert_eq!(eval("active and value > 3", &vars()).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_comparisons_and_membership() {
        assert_eq!(eval("value === 5", &vars()).unwrap(), Value::Bool(true));
        assert_eq!(eval(r#"user.tags contains "vip""#, &vars()).unwrap(), Value::Bool(true));
        assert_eq!(eval(r#""beta" in user.tags"#, &vars()).unwrap(), Value::Bool(true));
        assert_eq!(eval("user.age > 18", &vars()).unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_ternary() {
        assert_eq!(
            eval(r#"value > 3 ? "high" : "low""#, &vars()).unwrap(),
            Value::from("high")
        );
    }

    #[test]
    fn test_function_call() {
        assert_eq!(eval("count(1, 2, value)", &vars()).unwrap(), Value::Number(3.0));

        let err = eval("unknown(1)", &vars()).unwrap_err();
        assert_eq!(err, ExpressionError::UndefinedFunction("unknown".to_string()));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("value / 0", &vars()), Err(ExpressionError::DivisionByZero));
    }
}
