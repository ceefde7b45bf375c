//! Bundled function providers
//!
//! - `ValueFunctionProvider`: helpers for value decisions, reading the
//!   `value` variable (`add`, `subtract`, `equal`, `if_else`)
//! - `MathFunctionProvider`: `min`, `max`, `abs`, `round`

use crate::error::{ExpressionError, Result};
use crate::function::{ExpressionFunction, ExpressionFunctionProvider, Variables};
use arbiter_core::Value;

/// Variable read by the value helpers
pub const VALUE_VARIABLE: &str = "value";

fn expect_args(name: &str, args: &[Value], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(ExpressionError::Function {
            name: name.to_string(),
            message: format!("expected {} argument(s), got {}", count, args.len()),
        })
    }
}

fn current_value(name: &str, variables: &Variables) -> Result<f64> {
    let value = variables
        .get(VALUE_VARIABLE)
        .ok_or_else(|| ExpressionError::Function {
            name: name.to_string(),
            message: format!("variable '{}' is not set", VALUE_VARIABLE),
        })?;
    Ok(value.to_number()?)
}

/// Helpers operating on the running value of a value decision
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueFunctionProvider;

impl ExpressionFunctionProvider for ValueFunctionProvider {
    fn functions(&self) -> Vec<ExpressionFunction> {
        vec![
            ExpressionFunction::new("add", |vars, args| {
                expect_args("add", args, 1)?;
                Ok(Value::Number(current_value("add", vars)? + args[0].to_number()?))
            }),
            ExpressionFunction::new("subtract", |vars, args| {
                expect_args("subtract", args, 1)?;
                Ok(Value::Number(
                    current_value("subtract", vars)? - args[0].to_number()?,
                ))
            }),
            ExpressionFunction::new("equal", |_, args| {
                expect_args("equal", args, 1)?;
                Ok(args[0].clone())
            }),
            ExpressionFunction::new("if_else", |_, args| {
                expect_args("if_else", args, 3)?;
                let picked = if args[0].is_truthy() { &args[1] } else { &args[2] };
                Ok(picked.clone())
            }),
        ]
    }
}

/// Numeric helpers
#[derive(Debug, Clone, Copy, Default)]
pub struct MathFunctionProvider;

/// `min(1, 2)` and `min([1, 2])` are both accepted
fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>> {
    let items = match args {
        [Value::Array(items)] => items.as_slice(),
        _ => args,
    };

    if items.is_empty() {
        return Err(ExpressionError::Function {
            name: name.to_string(),
            message: "expected at least one number".to_string(),
        });
    }

    items
        .iter()
        .map(|item| item.to_number().map_err(ExpressionError::from))
        .collect()
}

impl ExpressionFunctionProvider for MathFunctionProvider {
    fn functions(&self) -> Vec<ExpressionFunction> {
        vec![
            ExpressionFunction::new("min", |_, args| {
                let values = numbers("min", args)?;
                Ok(Value::Number(values.into_iter().fold(f64::INFINITY, f64::min)))
            }),
            ExpressionFunction::new("max", |_, args| {
                let values = numbers("max", args)?;
                Ok(Value::Number(
                    values.into_iter().fold(f64::NEG_INFINITY, f64::max),
                ))
            }),
            ExpressionFunction::new("abs", |_, args| {
                expect_args("abs", args, 1)?;
                Ok(Value::Number(args[0].to_number()?.abs()))
            }),
            ExpressionFunction::new("round", |_, args| {
                let (value, precision) = match args {
                    [value] => (value.to_number()?, 0),
                    [value, precision] => (value.to_number()?, precision.to_number()? as i32),
                    _ => {
                        return Err(ExpressionError::Function {
                            name: "round".to_string(),
                            message: format!("expected 1 or 2 arguments, got {}", args.len()),
                        })
                    }
                };
                let factor = 10f64.powi(precision);
                Ok(Value::Number((value * factor).round() / factor))
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionRegistry;

    fn registry() -> FunctionRegistry {
        let mut registry = FunctionRegistry::new();
        for function in ValueFunctionProvider
            .functions()
            .into_iter()
            .chain(MathFunctionProvider.functions())
        {
            registry.add(function);
        }
        registry
    }

    fn call(name: &str, vars: &Variables, args: &[Value]) -> Result<Value> {
        registry().get(name).unwrap().call(vars, args)
    }

    fn with_value(value: i32) -> Variables {
        let mut vars = Variables::new();
        vars.insert(VALUE_VARIABLE.to_string(), Value::from(value));
        vars
    }

    #[test]
    fn test_add_and_subtract_use_value() {
        assert_eq!(
            call("add", &with_value(5), &[Value::from(5)]).unwrap(),
            Value::Number(10.0)
        );
        assert_eq!(
            call("subtract", &with_value(5), &[Value::from(8)]).unwrap(),
            Value::Number(-3.0)
        );
    }

    #[test]
    fn test_add_without_value() {
        let err = call("add", &Variables::new(), &[Value::from(1)]).unwrap_err();
        assert!(matches!(err, ExpressionError::Function { name, .. } if name == "add"));
    }

    #[test]
    fn test_argument_count_is_checked() {
        let err = call("add", &with_value(1), &[]).unwrap_err();
        assert!(err.to_string().contains("expected 1 argument(s), got 0"));
    }

    #[test]
    fn test_equal_and_if_else() {
        assert_eq!(
            call("equal", &Variables::new(), &[Value::from("fixed")]).unwrap(),
            Value::from("fixed")
        );
        assert_eq!(
            call(
                "if_else",
                &Variables::new(),
                &[Value::Bool(false), Value::from(1), Value::from(2)]
            )
            .unwrap(),
            Value::from(2)
        );
    }

    #[test]
    fn test_min_max() {
        let args = [Value::from(3), Value::from(1), Value::from(2)];
        assert_eq!(call("min", &Variables::new(), &args).unwrap(), Value::Number(1.0));
        assert_eq!(call("max", &Variables::new(), &args).unwrap(), Value::Number(3.0));

        let list = [Value::Array(args.to_vec())];
        assert_eq!(call("max", &Variables::new(), &list).unwrap(), Value::Number(3.0));

        assert!(call("min", &Variables::new(), &[]).is_err());
    }

    #[test]
    fn test_abs_and_round() {
        assert_eq!(
            call("abs", &Variables::new(), &[Value::from(-4)]).unwrap(),
            Value::Number(4.0)
        );
        assert_eq!(
            call("round", &Variables::new(), &[Value::from(1.256), Value::from(2)]).unwrap(),
            Value::Number(1.26)
        );
        assert_eq!(
            call("round", &Variables::new(), &[Value::from(2.5)]).unwrap(),
            Value::Number(3.0)
        );
    }
}
