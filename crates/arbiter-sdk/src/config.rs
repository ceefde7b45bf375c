//! Configuration types for DecisionEngine
//!
//! A `DecisionConfig` describes one decision declaratively: its type, name,
//! default output and a list of expression rules. It can be deserialized from
//! any serde source.
//!
//! ```json
//! {
//!   "decision_type": "value",
//!   "name": "pricing",
//!   "default_output": 0,
//!   "expressions": [
//!     { "expression": "add(5)", "priority": 10 },
//!     { "expression": "subtract(2)", "name": "discount", "extra": { "reason": "promo" } }
//!   ]
//! }
//! ```

use crate::decision_engine::DecisionType;
use crate::error::{DecisionError, Result};
use crate::rule::ExpressionRule;
use arbiter_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declarative decision configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// One of `unanimous`, `affirmative`, `consensus`, `value`
    pub decision_type: String,

    /// Decision name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Output when no rules are registered, also seeds value decisions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_output: Option<Value>,

    /// Stop evaluating once a rule stops propagation
    #[serde(default)]
    pub exit_on_propagation_stopped: bool,

    /// Expression rules
    #[serde(default)]
    pub expressions: Vec<ExpressionRuleConfig>,
}

/// Configuration of one expression rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionRuleConfig {
    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub priority: i32,

    /// Metadata recorded alongside every output of the rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<HashMap<String, Value>>,
}

impl DecisionConfig {
    /// Create a configuration for the given decision type
    pub fn new(decision_type: DecisionType) -> Self {
        Self {
            decision_type: decision_type.as_str().to_string(),
            name: None,
            default_output: None,
            exit_on_propagation_stopped: false,
            expressions: Vec::new(),
        }
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DecisionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the decision name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an expression rule
    pub fn with_expression(mut self, expression: ExpressionRuleConfig) -> Self {
        self.expressions.push(expression);
        self
    }

    pub fn decision_type(&self) -> Result<DecisionType> {
        self.decision_type.parse()
    }

    /// Check the decision type and every expression rule
    pub fn validate(&self) -> Result<()> {
        self.decision_type()?;

        for (index, rule) in self.expressions.iter().enumerate() {
            if rule.expression.trim().is_empty() {
                return Err(DecisionError::InvalidConfig(format!(
                    "expression rule #{} has an empty expression",
                    index
                )));
            }
        }

        Ok(())
    }
}

impl ExpressionRuleConfig {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            name: None,
            priority: 0,
            extra: None,
        }
    }

    pub fn to_rule(&self) -> ExpressionRule {
        let mut rule = ExpressionRule::new(&self.expression).with_priority(self.priority);
        if let Some(name) = &self.name {
            rule = rule.with_name(name);
        }
        if let Some(extra) = &self.extra {
            rule = rule.with_extra(extra.clone());
        }
        rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[test]
    fn test_from_json() {
        let config = DecisionConfig::from_json(
            r#"{
                "decision_type": "value",
                "name": "pricing",
                "default_output": 0,
                "expressions": [
                    {"expression": "add(5)", "priority": 10},
                    {"expression": "subtract(2)", "name": "discount", "extra": {"reason": "promo"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.decision_type().unwrap(), DecisionType::Value);
        assert_eq!(config.name.as_deref(), Some("pricing"));
        assert_eq!(config.default_output, Some(Value::Number(0.0)));
        assert!(!config.exit_on_propagation_stopped);
        assert_eq!(config.expressions.len(), 2);

        let first = config.expressions[0].to_rule();
        assert_eq!(first.name(), "add(5)");
        assert_eq!(first.priority(), 10);

        let second = config.expressions[1].to_rule();
        assert_eq!(second.name(), "discount");
    }

    #[test]
    fn test_invalid_decision_type() {
        let err = DecisionConfig::from_json(r#"{"decision_type": "majority"}"#).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidDecisionType(name) if name == "majority"));
    }

    #[test]
    fn test_malformed_json() {
        let err = DecisionConfig::from_json(r#"{"name": "missing type"}"#).unwrap_err();
        assert!(matches!(err, DecisionError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_expression() {
        let config = DecisionConfig::new(DecisionType::Consensus)
            .with_expression(ExpressionRuleConfig::new("  "));

        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: expression rule #0 has an empty expression"
        );
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let config = DecisionConfig::new(DecisionType::Unanimous)
            .with_name("kyc")
            .with_expression(ExpressionRuleConfig::new("age >= 18"));

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "decision_type": "unanimous",
                "name": "kyc",
                "exit_on_propagation_stopped": false,
                "expressions": [{"expression": "age >= 18", "priority": 0}]
            })
        );
    }
}
