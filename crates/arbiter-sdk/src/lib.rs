//! Arbiter Decision Engine SDK
//!
//! Rule-based decision making: rules are evaluated in priority order and
//! their outputs aggregated by a strategy (`unanimous`, `affirmative`,
//! `consensus` or `value`). Every run leaves an audit `Context` with the
//! output recorded for each rule.

pub mod builder;
pub mod config;
pub mod context;
pub mod decision_engine;
pub mod error;
pub mod rule;
pub mod strategy;

// Re-export main types
pub use builder::DecisionEngineBuilder;
pub use config::{DecisionConfig, ExpressionRuleConfig};
pub use context::{Context, Outcome, RecordedOutput, RuleOutputs};
pub use decision_engine::{
    DecisionEngine, DecisionType, Input, CONTEXT_KEY, DEFAULT_NAME, VALUE_KEY,
};
pub use error::{DecisionError, EvaluationError, Result, RuleError};
pub use rule::{
    EvaluationScope, ExpressionRule, NameRestrictedRule, PriorityRule, Rule, RuleOutput,
    RuleProvider,
};

// Re-export commonly used types from dependencies
pub use arbiter_core::Value;
pub use arbiter_expression::{ExpressionLanguage, SimpleExpressionLanguage};
