//! Core DecisionEngine implementation

use super::pipeline::RulePipeline;
use super::types::{DecisionType, Input, CONTEXT_KEY};
use crate::context::Context;
use crate::error::{DecisionError, EvaluationError, Result};
use crate::rule::Rule;
use crate::strategy::{self, Strategy};
use arbiter_core::Value;
use arbiter_expression::ExpressionLanguage;
use std::sync::Arc;

/// Name used when a decision is not given one
pub const DEFAULT_NAME: &str = "<no-name>";

/// Evaluates rules against an input and aggregates their outputs.
///
/// An engine is reusable: every `make` call starts from a fresh `Context`,
/// while the name, default output, rules and expression language persist.
/// One engine serves one `make` call at a time.
///
/// ```rust,ignore
/// use arbiter_sdk::{DecisionEngine, ExpressionRule};
///
/// let mut engine = DecisionEngine::value();
/// engine.set_expression_language(language);
/// engine.add_rule(ExpressionRule::new("add(5)"));
///
/// let output = engine.make(input)?;
/// ```
pub struct DecisionEngine {
    name: String,
    strategy: Box<dyn Strategy>,
    default_output: Option<Value>,
    exit_on_propagation_stopped: bool,
    expression_language: Option<Arc<dyn ExpressionLanguage>>,
    rules: Vec<Arc<dyn Rule>>,
    context: Option<Context>,
}

impl DecisionEngine {
    /// Create an engine for the given decision type
    pub fn new(decision_type: DecisionType) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            strategy: strategy::create(decision_type),
            default_output: None,
            exit_on_propagation_stopped: false,
            expression_language: None,
            rules: Vec::new(),
            context: None,
        }
    }

    pub fn unanimous() -> Self {
        Self::new(DecisionType::Unanimous)
    }

    pub fn affirmative() -> Self {
        Self::new(DecisionType::Affirmative)
    }

    pub fn consensus() -> Self {
        Self::new(DecisionType::Consensus)
    }

    pub fn value() -> Self {
        Self::new(DecisionType::Value)
    }

    pub fn add_rule(&mut self, rule: impl Rule + 'static) -> &mut Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Add a rule shared with other engines
    pub fn add_shared_rule(&mut self, rule: Arc<dyn Rule>) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> &mut Self {
        self.rules.extend(rules);
        self
    }

    /// Output returned when no rules are registered; also seeds value
    /// decisions whose input has no `value`
    pub fn set_default_output(&mut self, output: impl Into<Value>) -> &mut Self {
        self.default_output = Some(output.into());
        self
    }

    /// Stop evaluating rules once propagation is stopped, instead of
    /// recording the remaining rules as skipped
    pub fn set_exit_on_propagation_stopped(&mut self, exit: bool) -> &mut Self {
        self.exit_on_propagation_stopped = exit;
        self
    }

    pub fn set_expression_language(&mut self, language: Arc<dyn ExpressionLanguage>) -> &mut Self {
        self.expression_language = Some(language);
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn decision_type(&self) -> DecisionType {
        self.strategy.decision_type()
    }

    pub fn default_output(&self) -> Option<&Value> {
        self.default_output.as_ref()
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Context of the last `make` call.
    ///
    /// Fails with `ContextNotSet` before the first call and after a call
    /// rejected for using the reserved `context` key.
    pub fn get_context(&self) -> Result<&Context> {
        self.context
            .as_ref()
            .ok_or_else(|| DecisionError::ContextNotSet {
                name: self.name.clone(),
                decision_type: self.decision_type().to_string(),
            })
    }

    /// Evaluate the rules against `input` and return the decision output
    pub fn make(&mut self, input: Input) -> Result<Value> {
        // Rejected calls leave no context behind
        self.context = None;

        if input.contains_key(CONTEXT_KEY) {
            return Err(DecisionError::ReservedContextIndex {
                name: self.name.clone(),
                decision_type: self.decision_type().to_string(),
            });
        }

        let mut context = Context::new(self.decision_type(), input.clone());
        tracing::debug!(
            "Making decision '{}' ({}), run_id={}, rules={}",
            self.name,
            self.decision_type(),
            context.run_id(),
            self.rules.len()
        );

        let result = self.decide(input, &mut context);
        self.context = Some(context);

        result.map_err(|source| {
            tracing::warn!(
                "Decision '{}' of type '{}' failed: {}",
                self.name,
                self.decision_type(),
                source
            );
            DecisionError::UnableToDecide {
                name: self.name.clone(),
                decision_type: self.decision_type().to_string(),
                source,
            }
        })
    }

    fn decide(
        &mut self,
        mut input: Input,
        context: &mut Context,
    ) -> std::result::Result<Value, EvaluationError> {
        if self.rules.is_empty() {
            return match &self.default_output {
                Some(output) => Ok(output.clone()),
                None => self.strategy.default_output(&input),
            };
        }

        self.strategy
            .prepare(&mut input, self.default_output.as_ref())?;

        let pipeline = RulePipeline::new(
            &self.rules,
            self.exit_on_propagation_stopped,
            self.expression_language.as_deref(),
        );
        pipeline.run(&mut input, context, self.strategy.as_mut())?;

        let output = self.strategy.output(&input)?;
        tracing::debug!(
            "Decision '{}' made, run_id={}, output={}",
            self.name,
            context.run_id(),
            output
        );
        Ok(output)
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("name", &self.name)
            .field("decision_type", &self.decision_type())
            .field("default_output", &self.default_output)
            .field("exit_on_propagation_stopped", &self.exit_on_propagation_stopped)
            .field("rules", &self.rules.len())
            .finish()
    }
}
