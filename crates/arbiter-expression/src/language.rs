//! Expression language capability
//!
//! `ExpressionLanguage` is the seam the decision engine consumes; any
//! evaluator implementing it can be plugged into an engine. The bundled
//! `SimpleExpressionLanguage` parses with `ExpressionParser`, caches parsed
//! trees by source text and evaluates them with `Evaluator`.

use crate::error::{ExpressionError, Result};
use crate::evaluator::Evaluator;
use crate::function::{ExpressionFunction, ExpressionFunctionProvider, FunctionRegistry, Variables};
use crate::parser::ExpressionParser;
use arbiter_core::ast::Expression;
use arbiter_core::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Evaluator capability consumed by expression rules
pub trait ExpressionLanguage: Send + Sync {
    /// Evaluate `expression` against the given variable bindings
    fn evaluate(&self, expression: &str, variables: &Variables) -> Result<Value>;

    /// Check that `expression` parses and only uses the given variable names
    /// and registered functions.
    ///
    /// Returns `Ok(true)` when valid, otherwise `ExpressionError::InvalidExpression`.
    fn validate(&self, expression: &str, names: &[&str]) -> Result<bool>;

    fn add_function(&mut self, function: ExpressionFunction);

    fn add_functions(&mut self, functions: Vec<ExpressionFunction>) {
        for function in functions {
            self.add_function(function);
        }
    }

    fn remove_function(&mut self, name: &str);

    fn remove_functions(&mut self, names: &[&str]) {
        for name in names {
            self.remove_function(name);
        }
    }

    fn function_names(&self) -> Vec<String>;
}

/// Bundled expression language
#[derive(Debug, Default)]
pub struct SimpleExpressionLanguage {
    functions: FunctionRegistry,
    cache: RwLock<HashMap<String, Arc<Expression>>>,
}

impl SimpleExpressionLanguage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every function of a provider
    pub fn with_provider(mut self, provider: &dyn ExpressionFunctionProvider) -> Self {
        self.add_functions(provider.functions());
        self
    }

    /// Number of parsed expressions held in the cache
    pub fn cached_expressions(&self) -> usize {
        match self.cache.read() {
            Ok(cache) => cache.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn parse(&self, expression: &str) -> Result<Arc<Expression>> {
        let cached = match self.cache.read() {
            Ok(cache) => cache.get(expression).cloned(),
            Err(poisoned) => poisoned.into_inner().get(expression).cloned(),
        };
        if let Some(parsed) = cached {
            return Ok(parsed);
        }

        let parsed = Arc::new(ExpressionParser::parse(expression)?);
        tracing::debug!("Parsed expression '{}'", expression);

        let mut cache = match self.cache.write() {
            Ok(cache) => cache,
            Err(poisoned) => poisoned.into_inner(),
        };
        cache.insert(expression.to_string(), Arc::clone(&parsed));
        Ok(parsed)
    }
}

impl ExpressionLanguage for SimpleExpressionLanguage {
    fn evaluate(&self, expression: &str, variables: &Variables) -> Result<Value> {
        let parsed = self.parse(expression)?;
        Evaluator::new(variables, &self.functions).evaluate(&parsed)
    }

    fn validate(&self, expression: &str, names: &[&str]) -> Result<bool> {
        let invalid = |reason: String| ExpressionError::InvalidExpression {
            expression: expression.to_string(),
            reason,
        };

        let parsed = self.parse(expression).map_err(|e| invalid(e.to_string()))?;

        if let Some(unknown) = parsed
            .variables()
            .into_iter()
            .find(|variable| !names.contains(&variable.as_str()))
        {
            return Err(invalid(format!("unknown variable '{}'", unknown)));
        }

        if let Some(unknown) = parsed
            .functions()
            .into_iter()
            .find(|function| !self.functions.contains(function))
        {
            return Err(invalid(format!("unknown function '{}'", unknown)));
        }

        Ok(true)
    }

    fn add_function(&mut self, function: ExpressionFunction) {
        self.functions.add(function);
    }

    fn remove_function(&mut self, name: &str) {
        self.functions.remove(name);
    }

    fn function_names(&self) -> Vec<String> {
        self.functions.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{MathFunctionProvider, ValueFunctionProvider};

    fn language() -> SimpleExpressionLanguage {
        SimpleExpressionLanguage::new()
            .with_provider(&ValueFunctionProvider)
            .with_provider(&MathFunctionProvider)
    }

    #[test]
    fn test_parsed_expressions_are_cached() {
        let language = language();
        let mut vars = Variables::new();
        vars.insert("value".to_string(), Value::from(1));

        language.evaluate("add(1)", &vars).unwrap();
        language.evaluate("add(1)", &vars).unwrap();
        language.evaluate("add(2)", &vars).unwrap();

        assert_eq!(language.cached_expressions(), 2);
    }

    #[test]
    fn test_syntax_errors_are_not_cached() {
        let language = language();
        assert!(language.evaluate("1 +", &Variables::new()).is_err());
        assert_eq!(language.cached_expressions(), 0);
    }

    #[test]
    fn test_validate_reports_invalid_expression() {
        let language = language();

        let err = language.validate("1 +", &[]).unwrap_err();
        assert!(matches!(err, ExpressionError::InvalidExpression { .. }));

        let err = language.validate("unknown(1)", &[]).unwrap_err();
        assert!(err.to_string().contains("unknown function 'unknown'"));
    }

    #[test]
    fn test_function_names_follow_registration() {
        let mut language = SimpleExpressionLanguage::new().with_provider(&ValueFunctionProvider);
        assert_eq!(
            language.function_names(),
            vec!["add", "subtract", "equal", "if_else"]
        );

        language.remove_functions(&["subtract", "equal"]);
        assert_eq!(language.function_names(), vec!["add", "if_else"]);
    }
}
