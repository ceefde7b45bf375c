//! Rule pipeline
//!
//! Orders rules by priority and runs them one at a time, recording each
//! outcome in the context and forwarding real outputs to the strategy.

use super::types::Input;
use crate::context::{Context, RecordedOutput};
use crate::error::{EvaluationError, RuleError};
use crate::rule::{EvaluationScope, Rule};
use crate::strategy::Strategy;
use arbiter_expression::ExpressionLanguage;
use std::cmp::Reverse;
use std::sync::Arc;

pub(crate) struct RulePipeline<'a> {
    rules: Vec<&'a Arc<dyn Rule>>,
    exit_on_propagation_stopped: bool,
    expression_language: Option<&'a dyn ExpressionLanguage>,
}

impl<'a> RulePipeline<'a> {
    /// Rules are sorted by descending priority; the sort is stable so equal
    /// priorities keep registration order
    pub(crate) fn new(
        rules: &'a [Arc<dyn Rule>],
        exit_on_propagation_stopped: bool,
        expression_language: Option<&'a dyn ExpressionLanguage>,
    ) -> Self {
        let mut rules: Vec<&'a Arc<dyn Rule>> = rules.iter().collect();
        rules.sort_by_key(|rule| Reverse(rule.priority()));

        Self {
            rules,
            exit_on_propagation_stopped,
            expression_language,
        }
    }

    pub(crate) fn run(
        &self,
        input: &mut Input,
        context: &mut Context,
        strategy: &mut dyn Strategy,
    ) -> Result<(), EvaluationError> {
        for rule in &self.rules {
            let name = rule.name();

            if context.is_propagation_stopped() {
                if self.exit_on_propagation_stopped {
                    tracing::debug!("Propagation stopped, exiting before rule '{}'", name);
                    break;
                }

                tracing::debug!("Propagation stopped, skipping rule '{}'", name);
                context.add_rule_output(name, rule.audited_output(RecordedOutput::skipped()));
                continue;
            }

            if !rule.supports(input) {
                tracing::debug!("Rule '{}' does not support the input", name);
                context.add_rule_output(name, rule.audited_output(RecordedOutput::unsupported()));
                continue;
            }

            let result = {
                let mut scope = EvaluationScope::new(context, self.expression_language);
                rule.evaluate(input, &mut scope)
            };

            match result {
                Ok(output) => {
                    let (value, recorded) = output.resolve();
                    context.add_rule_output(name, rule.audited_output(recorded));
                    strategy.handle_rule_output(&value, input, context);
                }
                Err(RuleError::NonBlocking {
                    message,
                    error_output,
                }) => {
                    tracing::debug!("Rule '{}' failed without blocking: {}", name, message);
                    context.add_rule_output(
                        name,
                        rule.audited_output(RecordedOutput::output(error_output)),
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_engine::DecisionType;
    use crate::rule::RuleOutput;
    use crate::strategy;
    use arbiter_core::Value;

    struct Fixed {
        name: &'static str,
        priority: i32,
        output: bool,
    }

    impl Rule for Fixed {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn supports(&self, _input: &Input) -> bool {
            true
        }

        fn evaluate(
            &self,
            _input: &Input,
            _scope: &mut EvaluationScope<'_>,
        ) -> Result<RuleOutput, RuleError> {
            Ok(self.output.into())
        }
    }

    fn fixed(name: &'static str, priority: i32, output: bool) -> Arc<dyn Rule> {
        Arc::new(Fixed {
            name,
            priority,
            output,
        })
    }

    #[test]
    fn test_higher_priority_first_and_stable() {
        let rules = vec![
            fixed("low", -1, true),
            fixed("first", 0, true),
            fixed("high", 10, true),
            fixed("second", 0, true),
        ];
        let pipeline = RulePipeline::new(&rules, false, None);

        let mut input = Input::new();
        let mut context = Context::new(DecisionType::Consensus, Input::new());
        let mut strategy = strategy::create(DecisionType::Consensus);
        pipeline
            .run(&mut input, &mut context, strategy.as_mut())
            .unwrap();

        assert_eq!(
            context.rule_outputs().names(),
            vec!["high", "first", "second", "low"]
        );
    }

    #[test]
    fn test_stop_records_skipped_or_exits() {
        let rules = vec![fixed("no", 0, false), fixed("yes", 0, true)];

        for (exit, expected) in [(false, vec!["no", "yes"]), (true, vec!["no"])] {
            let pipeline = RulePipeline::new(&rules, exit, None);
            let mut input = Input::new();
            let mut context = Context::new(DecisionType::Unanimous, Input::new());
            let mut strategy = strategy::create(DecisionType::Unanimous);
            strategy.prepare(&mut input, None).unwrap();

            pipeline
                .run(&mut input, &mut context, strategy.as_mut())
                .unwrap();

            assert_eq!(context.rule_outputs().names(), expected);
            assert_eq!(strategy.output(&input).unwrap(), Value::Bool(false));
            if !exit {
                assert!(context.rule_outputs().get("yes").unwrap().is_skipped());
            }
        }
    }
}
