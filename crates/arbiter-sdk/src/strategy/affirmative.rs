use super::Strategy;
use crate::context::Context;
use crate::decision_engine::{DecisionType, Input};
use crate::error::EvaluationError;
use arbiter_core::Value;

/// True as soon as a rule returns a truthy output
#[derive(Debug, Default)]
pub struct AffirmativeStrategy {
    output: bool,
}

impl Strategy for AffirmativeStrategy {
    fn decision_type(&self) -> DecisionType {
        DecisionType::Affirmative
    }

    fn prepare(
        &mut self,
        _input: &mut Input,
        _default_output: Option<&Value>,
    ) -> Result<(), EvaluationError> {
        self.output = false;
        Ok(())
    }

    fn default_output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(false))
    }

    fn handle_rule_output(&mut self, output: &Value, _input: &mut Input, context: &mut Context) {
        if output.is_truthy() {
            self.output = true;
            context.stop_propagation();
        }
    }

    fn output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(self.output))
    }
}
