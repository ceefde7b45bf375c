//! Rule backed by an expression string

use super::{EvaluationScope, Rule, RuleOutput};
use crate::context::RecordedOutput;
use crate::decision_engine::{Input, CONTEXT_KEY};
use crate::error::RuleError;
use arbiter_core::Value;
use std::collections::HashMap;

/// Evaluates an expression with the engine's expression language.
///
/// Variables visible to the expression are the input keys plus `context`,
/// the current run's `Context` as a value.
///
/// ```rust,ignore
/// let rule = ExpressionRule::new("amount > 100")
///     .with_name("large amount")
///     .with_priority(10);
/// ```
#[derive(Debug, Clone)]
pub struct ExpressionRule {
    expression: String,
    name: Option<String>,
    priority: i32,
    extra: Option<HashMap<String, Value>>,
}

impl ExpressionRule {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            name: None,
            priority: 0,
            extra: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Record every output of this rule together with `extra`
    pub fn with_extra(mut self, extra: HashMap<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl Rule for ExpressionRule {
    fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.expression.clone())
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, _input: &Input) -> bool {
        true
    }

    fn evaluate(
        &self,
        input: &Input,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        let language = scope.expression_language()?;

        let mut variables = input.clone();
        variables.insert(CONTEXT_KEY.to_string(), scope.context().to_value());

        let output = language.evaluate(&self.expression, &variables)?;
        Ok(RuleOutput::Bare(output))
    }

    fn audited_output(&self, output: RecordedOutput) -> RecordedOutput {
        match &self.extra {
            Some(extra) => output.with_extra(extra.clone()),
            None => output,
        }
    }
}
