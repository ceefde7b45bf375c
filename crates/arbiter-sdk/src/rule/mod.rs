//! Rule contract
//!
//! A rule states whether it supports an input and, if so, produces an output.
//! Rules are immutable and reused across runs; per-run state lives in the
//! `Context` reached through `EvaluationScope`.

mod decorators;
mod expression_rule;

pub use decorators::{NameRestrictedRule, PriorityRule};
pub use expression_rule::ExpressionRule;

use crate::context::{Context, RecordedOutput};
use crate::decision_engine::Input;
use crate::error::RuleError;
use arbiter_core::Value;
use arbiter_expression::ExpressionLanguage;
use std::collections::HashMap;
use std::sync::Arc;

/// Output of a successful rule evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutput {
    /// Plain output
    Bare(Value),
    /// Output recorded together with extra metadata; only `output` reaches
    /// the strategy
    WithExtra {
        output: Value,
        extra: HashMap<String, Value>,
    },
}

impl RuleOutput {
    pub fn with_extra(output: impl Into<Value>, extra: HashMap<String, Value>) -> Self {
        RuleOutput::WithExtra {
            output: output.into(),
            extra,
        }
    }

    /// Split into the value handed to the strategy and the record to audit
    pub(crate) fn resolve(self) -> (Value, RecordedOutput) {
        match self {
            RuleOutput::Bare(output) => (output.clone(), RecordedOutput::output(output)),
            RuleOutput::WithExtra { output, extra } => {
                (output.clone(), RecordedOutput::output(output).with_extra(extra))
            }
        }
    }
}

impl From<Value> for RuleOutput {
    fn from(value: Value) -> Self {
        RuleOutput::Bare(value)
    }
}

impl From<bool> for RuleOutput {
    fn from(value: bool) -> Self {
        RuleOutput::Bare(Value::Bool(value))
    }
}

impl From<f64> for RuleOutput {
    fn from(value: f64) -> Self {
        RuleOutput::Bare(Value::Number(value))
    }
}

impl From<i32> for RuleOutput {
    fn from(value: i32) -> Self {
        RuleOutput::Bare(Value::from(value))
    }
}

impl From<&str> for RuleOutput {
    fn from(value: &str) -> Self {
        RuleOutput::Bare(Value::from(value))
    }
}

impl From<String> for RuleOutput {
    fn from(value: String) -> Self {
        RuleOutput::Bare(Value::String(value))
    }
}

/// What a rule can reach while it evaluates
pub struct EvaluationScope<'a> {
    context: &'a mut Context,
    expression_language: Option<&'a dyn ExpressionLanguage>,
}

impl<'a> EvaluationScope<'a> {
    pub fn new(
        context: &'a mut Context,
        expression_language: Option<&'a dyn ExpressionLanguage>,
    ) -> Self {
        Self {
            context,
            expression_language,
        }
    }

    pub fn context(&self) -> &Context {
        &*self.context
    }

    /// Skip (or abort) every rule after this one
    pub fn stop_propagation(&mut self) {
        self.context.stop_propagation();
    }

    /// Expression language of the engine running the rule
    pub fn expression_language(&self) -> Result<&'a dyn ExpressionLanguage, RuleError> {
        self.expression_language
            .ok_or(RuleError::ExpressionLanguageNotSet)
    }
}

/// Unit of decision logic
pub trait Rule: Send + Sync {
    /// Display name, used as the audit key
    fn name(&self) -> String;

    /// Higher priorities run first
    fn priority(&self) -> i32 {
        0
    }

    fn supports(&self, input: &Input) -> bool;

    fn evaluate(
        &self,
        input: &Input,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError>;

    /// Customize what gets recorded for this rule, sentinels included
    fn audited_output(&self, output: RecordedOutput) -> RecordedOutput {
        output
    }

    /// Whether the rule belongs in the decision with the given name
    fn applies_to_decision(&self, _decision_name: &str) -> bool {
        true
    }
}

/// Source of a set of rules, typically one per business domain
pub trait RuleProvider {
    fn rules(&self) -> Vec<Arc<dyn Rule>>;
}
