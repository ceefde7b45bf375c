//! Unit tests for DecisionEngine

use super::*;
use crate::error::{DecisionError, EvaluationError, RuleError};
use crate::rule::{EvaluationScope, Rule, RuleOutput};
use arbiter_core::Value;

/// Returns the input's `flag`, unsupported when absent
struct FlagRule;

impl Rule for FlagRule {
    fn name(&self) -> String {
        "flag".to_string()
    }

    fn supports(&self, input: &Input) -> bool {
        input.contains_key("flag")
    }

    fn evaluate(
        &self,
        input: &Input,
        _scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        Ok(input.get("flag").cloned().unwrap_or_default().into())
    }
}

fn input(pairs: &[(&str, Value)]) -> Input {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn test_engine_defaults() {
    let engine = DecisionEngine::consensus();

    assert_eq!(engine.name(), DEFAULT_NAME);
    assert_eq!(engine.decision_type(), DecisionType::Consensus);
    assert!(engine.default_output().is_none());
    assert!(engine.rules().is_empty());
}

#[test]
fn test_get_context_before_make() {
    let mut engine = DecisionEngine::unanimous();
    engine.set_name("kyc");

    let err = engine.get_context().unwrap_err();
    assert!(matches!(err, DecisionError::ContextNotSet { .. }));
    assert!(err
        .to_string()
        .starts_with("Decision \"kyc\" of type \"unanimous\""));
}

#[test]
fn test_reserved_context_key_for_every_type() {
    for decision_type in DecisionType::ALL {
        let mut engine = DecisionEngine::new(decision_type);
        engine.add_rule(FlagRule);

        let err = engine
            .make(input(&[(CONTEXT_KEY, Value::from(1))]))
            .unwrap_err();
        assert!(matches!(err, DecisionError::ReservedContextIndex { .. }));
        assert!(engine.get_context().is_err());
    }
}

#[test]
fn test_rejected_make_clears_previous_context() {
    let mut engine = DecisionEngine::consensus();
    engine.add_rule(FlagRule);

    engine.make(input(&[("flag", Value::Bool(true))])).unwrap();
    assert!(engine.get_context().is_ok());

    let err = engine
        .make(input(&[(CONTEXT_KEY, Value::from(1))]))
        .unwrap_err();
    assert!(matches!(err, DecisionError::ReservedContextIndex { .. }));
    assert!(matches!(
        engine.get_context(),
        Err(DecisionError::ContextNotSet { .. })
    ));
}

#[test]
fn test_zero_rules_strategy_defaults() {
    let expected = [
        (DecisionType::Unanimous, Value::Bool(true)),
        (DecisionType::Affirmative, Value::Bool(false)),
        (DecisionType::Consensus, Value::Bool(true)),
    ];

    for (decision_type, output) in expected {
        let mut engine = DecisionEngine::new(decision_type);
        assert_eq!(engine.make(Input::new()).unwrap(), output);
        assert!(engine.get_context().unwrap().rule_outputs().is_empty());
    }

    let mut engine = DecisionEngine::value();
    let output = engine
        .make(input(&[(VALUE_KEY, Value::from(7))]))
        .unwrap();
    assert_eq!(output, Value::from(7));
}

#[test]
fn test_zero_rules_explicit_default() {
    let mut engine = DecisionEngine::value();
    engine.set_default_output(10);
    assert_eq!(engine.make(Input::new()).unwrap(), Value::from(10));

    let mut engine = DecisionEngine::affirmative();
    engine.set_default_output("fallback");
    assert_eq!(engine.make(Input::new()).unwrap(), Value::from("fallback"));
}

#[test]
fn test_value_without_seed_or_default() {
    let mut engine = DecisionEngine::value();

    let err = engine.make(Input::new()).unwrap_err();
    assert!(matches!(
        err,
        DecisionError::UnableToDecide {
            source: EvaluationError::MissingValueIndex,
            ..
        }
    ));

    engine.add_rule(FlagRule);
    let err = engine.make(input(&[("flag", Value::Bool(true))])).unwrap_err();
    assert!(matches!(
        err,
        DecisionError::UnableToDecide {
            source: EvaluationError::MissingValueIndex,
            ..
        }
    ));
    // No rule ran
    assert!(engine.get_context().unwrap().rule_outputs().is_empty());
}

#[test]
fn test_fresh_context_per_make() {
    let mut engine = DecisionEngine::unanimous();
    engine.add_rule(FlagRule);

    engine.make(input(&[("flag", Value::Bool(false))])).unwrap();
    assert!(engine.get_context().unwrap().is_propagation_stopped());

    let output = engine.make(input(&[("other", Value::Null)])).unwrap();
    let context = engine.get_context().unwrap();

    assert_eq!(output, Value::Bool(true));
    assert!(!context.is_propagation_stopped());
    assert!(!context.original_input().contains_key("flag"));
    assert!(context.rule_outputs().get("flag").unwrap().is_unsupported());
    assert_eq!(context.rule_outputs().len(), 1);
}

#[test]
fn test_debug_output() {
    let mut engine = DecisionEngine::affirmative();
    engine.set_name("debug").add_rule(FlagRule);

    let debug = format!("{:?}", engine);
    assert!(debug.contains("\"debug\""));
    assert!(debug.contains("Affirmative"));
    assert!(debug.contains("rules: 1"));
}
