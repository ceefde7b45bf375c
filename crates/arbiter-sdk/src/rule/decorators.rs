//! Rule decorators

use super::{EvaluationScope, Rule, RuleOutput};
use crate::context::RecordedOutput;
use crate::decision_engine::Input;
use crate::error::RuleError;

/// Overrides the priority of the wrapped rule
#[derive(Debug, Clone)]
pub struct PriorityRule<R> {
    inner: R,
    priority: i32,
}

impl<R: Rule> PriorityRule<R> {
    pub fn new(inner: R, priority: i32) -> Self {
        Self { inner, priority }
    }
}

impl<R: Rule> Rule for PriorityRule<R> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn supports(&self, input: &Input) -> bool {
        self.inner.supports(input)
    }

    fn evaluate(
        &self,
        input: &Input,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        self.inner.evaluate(input, scope)
    }

    fn audited_output(&self, output: RecordedOutput) -> RecordedOutput {
        self.inner.audited_output(output)
    }

    fn applies_to_decision(&self, decision_name: &str) -> bool {
        self.inner.applies_to_decision(decision_name)
    }
}

/// Restricts the wrapped rule to decisions with one of the given names
#[derive(Debug, Clone)]
pub struct NameRestrictedRule<R> {
    inner: R,
    decision_names: Vec<String>,
}

impl<R: Rule> NameRestrictedRule<R> {
    pub fn new<I, S>(inner: R, decision_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner,
            decision_names: decision_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl<R: Rule> Rule for NameRestrictedRule<R> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn priority(&self) -> i32 {
        self.inner.priority()
    }

    fn supports(&self, input: &Input) -> bool {
        self.inner.supports(input)
    }

    fn evaluate(
        &self,
        input: &Input,
        scope: &mut EvaluationScope<'_>,
    ) -> Result<RuleOutput, RuleError> {
        self.inner.evaluate(input, scope)
    }

    fn audited_output(&self, output: RecordedOutput) -> RecordedOutput {
        self.inner.audited_output(output)
    }

    fn applies_to_decision(&self, decision_name: &str) -> bool {
        self.decision_names.iter().any(|name| name == decision_name)
            && self.inner.applies_to_decision(decision_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ExpressionRule;

    #[test]
    fn test_priority_override() {
        let rule = PriorityRule::new(ExpressionRule::new("true").with_priority(1), 50);
        assert_eq!(rule.priority(), 50);
        assert_eq!(rule.name(), "true");
    }

    #[test]
    fn test_name_restriction() {
        let rule = NameRestrictedRule::new(ExpressionRule::new("true"), ["pricing", "limits"]);

        assert!(rule.applies_to_decision("pricing"));
        assert!(rule.applies_to_decision("limits"));
        assert!(!rule.applies_to_decision("<no-name>"));
    }

    #[test]
    fn test_decorators_compose() {
        let rule = PriorityRule::new(
            NameRestrictedRule::new(ExpressionRule::new("false"), vec!["fraud".to_string()]),
            -5,
        );

        assert_eq!(rule.priority(), -5);
        assert!(rule.applies_to_decision("fraud"));
        assert!(!rule.applies_to_decision("pricing"));
    }
}
