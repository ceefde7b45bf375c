use super::Strategy;
use crate::context::Context;
use crate::decision_engine::{DecisionType, Input};
use crate::error::EvaluationError;
use arbiter_core::Value;

/// True unless a rule returns a falsy output
#[derive(Debug)]
pub struct UnanimousStrategy {
    output: bool,
}

impl Default for UnanimousStrategy {
    fn default() -> Self {
        Self { output: true }
    }
}

impl Strategy for UnanimousStrategy {
    fn decision_type(&self) -> DecisionType {
        DecisionType::Unanimous
    }

    fn prepare(
        &mut self,
        _input: &mut Input,
        _default_output: Option<&Value>,
    ) -> Result<(), EvaluationError> {
        self.output = true;
        Ok(())
    }

    fn default_output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(true))
    }

    fn handle_rule_output(&mut self, output: &Value, _input: &mut Input, context: &mut Context) {
        if !output.is_truthy() {
            self.output = false;
            context.stop_propagation();
        }
    }

    fn output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(self.output))
    }
}
