use super::Strategy;
use crate::context::Context;
use crate::decision_engine::{DecisionType, Input, VALUE_KEY};
use crate::error::EvaluationError;
use arbiter_core::Value;

/// Threads a value through the rules; each output replaces `value`
#[derive(Debug, Default)]
pub struct ValueStrategy;

impl Strategy for ValueStrategy {
    fn decision_type(&self) -> DecisionType {
        DecisionType::Value
    }

    /// Seed `value` from the default output when the input has none
    fn prepare(
        &mut self,
        input: &mut Input,
        default_output: Option<&Value>,
    ) -> Result<(), EvaluationError> {
        if input.contains_key(VALUE_KEY) {
            return Ok(());
        }

        let seed = default_output.ok_or(EvaluationError::MissingValueIndex)?;
        tracing::debug!("No value in input, seeding value decision with {}", seed);
        input.insert(VALUE_KEY.to_string(), seed.clone());
        Ok(())
    }

    fn default_output(&self, input: &Input) -> Result<Value, EvaluationError> {
        self.output(input)
    }

    fn handle_rule_output(&mut self, output: &Value, input: &mut Input, _context: &mut Context) {
        input.insert(VALUE_KEY.to_string(), output.clone());
    }

    fn output(&self, input: &Input) -> Result<Value, EvaluationError> {
        input
            .get(VALUE_KEY)
            .cloned()
            .ok_or(EvaluationError::MissingValueIndex)
    }
}
