//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use arbiter_expression::{MathFunctionProvider, SimpleExpressionLanguage, ValueFunctionProvider};
use arbiter_sdk::{
    EvaluationScope, ExpressionLanguage, Input, RecordedOutput, Rule, RuleError, RuleOutput, Value,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Rule returning a fixed output
pub struct RuleStub {
    name: String,
    output: Value,
    priority: i32,
    supported: bool,
    extra: Option<HashMap<String, Value>>,
}

impl RuleStub {
    pub fn new(name: &str, output: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            output: output.into(),
            priority: 0,
            supported: true,
            extra: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.supported = false;
        self
    }

    /// Record outputs with extra metadata through `audited_output`
    pub fn with_extra(mut self, extra: HashMap<String, Value>) -> Self {
        self.extra = Some(extra);
        self
    }
}

impl Rule for RuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, _input: &Input) -> bool {
        self.supported
    }

    fn evaluate(
        &self,
        _input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Ok(RuleOutput::Bare(self.output.clone()))
    }

    fn audited_output(&self, output: RecordedOutput) -> RecordedOutput {
        match &self.extra {
            Some(extra) => output.with_extra(extra.clone()),
            None => output,
        }
    }
}

/// Rule supported only when the input has `key`, returning that entry
pub struct InputKeyRuleStub {
    name: String,
    key: String,
}

impl InputKeyRuleStub {
    pub fn new(name: &str, key: &str) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
        }
    }
}

impl Rule for InputKeyRuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, input: &Input) -> bool {
        input.contains_key(&self.key)
    }

    fn evaluate(
        &self,
        input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Ok(RuleOutput::Bare(
            input.get(&self.key).cloned().unwrap_or_default(),
        ))
    }
}

/// Rule that stops propagation and returns its output
pub struct StopPropagationRuleStub {
    name: String,
    output: Value,
}

impl StopPropagationRuleStub {
    pub fn new(name: &str, output: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            output: output.into(),
        }
    }
}

impl Rule for StopPropagationRuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, _input: &Input) -> bool {
        true
    }

    fn evaluate(
        &self,
        _input: &Input,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        scope.stop_propagation();
        Ok(RuleOutput::Bare(self.output.clone()))
    }
}

/// Rule returning an output with extra metadata
pub struct WithExtraOutputRuleStub {
    name: String,
    output: Value,
    extra: HashMap<String, Value>,
}

impl WithExtraOutputRuleStub {
    pub fn new(name: &str, output: impl Into<Value>, extra: HashMap<String, Value>) -> Self {
        Self {
            name: name.to_string(),
            output: output.into(),
            extra,
        }
    }
}

impl Rule for WithExtraOutputRuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, _input: &Input) -> bool {
        true
    }

    fn evaluate(
        &self,
        _input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Ok(RuleOutput::with_extra(self.output.clone(), self.extra.clone()))
    }
}

/// Rule failing with a non-blocking error
pub struct NonBlockingErrorRuleStub {
    name: String,
    error_output: Value,
}

impl NonBlockingErrorRuleStub {
    pub fn new(name: &str, error_output: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            error_output: error_output.into(),
        }
    }
}

impl Rule for NonBlockingErrorRuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, _input: &Input) -> bool {
        true
    }

    fn evaluate(
        &self,
        _input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Err(RuleError::non_blocking(
            "upstream unavailable",
            self.error_output.clone(),
        ))
    }
}

/// Rule failing with an unrecoverable error
pub struct FailingRuleStub {
    name: String,
}

impl FailingRuleStub {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Rule for FailingRuleStub {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn supports(&self, _input: &Input) -> bool {
        true
    }

    fn evaluate(
        &self,
        _input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Err(anyhow::anyhow!("rule {} exploded", self.name).into())
    }
}

/// Expression language with the value and math helpers registered
pub fn expression_language() -> Arc<dyn ExpressionLanguage> {
    Arc::new(
        SimpleExpressionLanguage::new()
            .with_provider(&ValueFunctionProvider)
            .with_provider(&MathFunctionProvider),
    )
}

/// Build an input from a JSON object
pub fn input(json: serde_json::Value) -> Input {
    match Value::from(json) {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {:?}", other),
    }
}

/// Build extra metadata from a JSON object
pub fn extra(json: serde_json::Value) -> HashMap<String, Value> {
    input(json)
}

/// Rule outputs of the last run as JSON
pub fn rule_outputs_json(engine: &arbiter_sdk::DecisionEngine) -> serde_json::Value {
    let context = engine.get_context().expect("context should be set after make");
    context.rule_outputs().to_value().into()
}
