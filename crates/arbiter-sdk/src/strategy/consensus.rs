use super::Strategy;
use crate::context::Context;
use crate::decision_engine::{DecisionType, Input};
use crate::error::EvaluationError;
use arbiter_core::Value;

/// Majority vote over rule outputs, ties favor true
#[derive(Debug, Default)]
pub struct ConsensusStrategy {
    trues: usize,
    falses: usize,
}

impl Strategy for ConsensusStrategy {
    fn decision_type(&self) -> DecisionType {
        DecisionType::Consensus
    }

    fn prepare(
        &mut self,
        _input: &mut Input,
        _default_output: Option<&Value>,
    ) -> Result<(), EvaluationError> {
        self.trues = 0;
        self.falses = 0;
        Ok(())
    }

    fn default_output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(true))
    }

    fn handle_rule_output(&mut self, output: &Value, _input: &mut Input, _context: &mut Context) {
        if output.is_truthy() {
            self.trues += 1;
        } else {
            self.falses += 1;
        }
    }

    fn output(&self, _input: &Input) -> Result<Value, EvaluationError> {
        Ok(Value::Bool(self.trues >= self.falses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(outputs: &[bool]) -> Value {
        let mut strategy = ConsensusStrategy::default();
        let mut input = Input::new();
        let mut context = Context::new(DecisionType::Consensus, Input::new());
        strategy.prepare(&mut input, None).unwrap();

        for output in outputs {
            strategy.handle_rule_output(&Value::Bool(*output), &mut input, &mut context);
        }
        assert!(!context.is_propagation_stopped());
        strategy.output(&input).unwrap()
    }

    #[test]
    fn test_majority() {
        assert_eq!(run(&[true, false, false]), Value::Bool(false));
        assert_eq!(run(&[true, true, false]), Value::Bool(true));
    }

    #[test]
    fn test_tie_favors_true() {
        assert_eq!(run(&[true, false]), Value::Bool(true));
        assert_eq!(run(&[]), Value::Bool(true));
    }
}
