//! Builder pattern for DecisionEngine

use crate::config::DecisionConfig;
use crate::decision_engine::{DecisionEngine, DecisionType, DEFAULT_NAME};
use crate::error::Result;
use crate::rule::{Rule, RuleProvider};
use arbiter_core::Value;
use arbiter_expression::ExpressionLanguage;
use std::sync::Arc;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,ignore
/// use arbiter_sdk::{DecisionEngineBuilder, DecisionType, ExpressionRule};
///
/// // Manual configuration
/// let engine = DecisionEngineBuilder::new(DecisionType::Value)
///     .with_name("pricing")
///     .with_expression_language(language)
///     .add_rule(ExpressionRule::new("add(5)"))
///     .build();
///
/// // From a configuration document
/// let engine = DecisionEngineBuilder::from_config(&config)?
///     .with_expression_language(language)
///     .build();
/// ```
pub struct DecisionEngineBuilder {
    decision_type: DecisionType,
    name: Option<String>,
    default_output: Option<Value>,
    exit_on_propagation_stopped: bool,
    expression_language: Option<Arc<dyn ExpressionLanguage>>,
    rules: Vec<Arc<dyn Rule>>,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new(decision_type: DecisionType) -> Self {
        Self {
            decision_type,
            name: None,
            default_output: None,
            exit_on_propagation_stopped: false,
            expression_language: None,
            rules: Vec::new(),
        }
    }

    /// Create a builder from a validated configuration
    pub fn from_config(config: &DecisionConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new(config.decision_type()?)
            .exit_on_propagation_stopped(config.exit_on_propagation_stopped);

        if let Some(name) = &config.name {
            builder = builder.with_name(name);
        }
        if let Some(output) = &config.default_output {
            builder = builder.with_default_output(output.clone());
        }
        for expression in &config.expressions {
            builder = builder.add_rule(expression.to_rule());
        }

        Ok(builder)
    }

    /// Set the decision name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the default output
    pub fn with_default_output(mut self, output: impl Into<Value>) -> Self {
        self.default_output = Some(output.into());
        self
    }

    /// Stop evaluating once a rule stops propagation
    pub fn exit_on_propagation_stopped(mut self, exit: bool) -> Self {
        self.exit_on_propagation_stopped = exit;
        self
    }

    /// Set the expression language used by expression rules
    pub fn with_expression_language(mut self, language: Arc<dyn ExpressionLanguage>) -> Self {
        self.expression_language = Some(language);
        self
    }

    /// Add a rule
    pub fn add_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Add multiple rules
    pub fn add_rules(mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Add every rule of a provider
    pub fn with_rule_provider(self, provider: &dyn RuleProvider) -> Self {
        self.add_rules(provider.rules())
    }

    /// Build the engine.
    ///
    /// Rules restricted to other decision names are left out.
    pub fn build(self) -> DecisionEngine {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        let (rules, excluded): (Vec<_>, Vec<_>) = self
            .rules
            .into_iter()
            .partition(|rule| rule.applies_to_decision(&name));
        for rule in &excluded {
            tracing::debug!(
                "Rule '{}' does not apply to decision '{}', excluded",
                rule.name(),
                name
            );
        }

        let mut engine = DecisionEngine::new(self.decision_type);
        engine
            .set_name(name)
            .set_exit_on_propagation_stopped(self.exit_on_propagation_stopped)
            .add_rules(rules);

        if let Some(output) = self.default_output {
            engine.set_default_output(output);
        }
        if let Some(language) = self.expression_language {
            engine.set_expression_language(language);
        }

        tracing::info!(
            "Built {} decision '{}' with {} rule(s)",
            engine.decision_type(),
            engine.name(),
            engine.rules().len()
        );
        engine
    }
}
