//! SDK error types
//!
//! Three layers:
//! - `RuleError`: raised by a single rule; `NonBlocking` is recorded and the
//!   run continues, anything else aborts the run
//! - `EvaluationError`: anything that aborts a pipeline pass or the strategy
//! - `DecisionError`: what callers of the engine observe

use arbiter_core::Value;
use arbiter_expression::ExpressionError;
use thiserror::Error;

/// Error raised by a rule while evaluating
#[derive(Error, Debug)]
pub enum RuleError {
    /// Recoverable failure: `error_output` is recorded as the rule output
    #[error("{message}")]
    NonBlocking { message: String, error_output: Value },

    /// An expression rule ran on an engine without an expression language
    #[error(
        "Expression language not set, to use it in your rules you must set it on the decision instance"
    )]
    ExpressionLanguageNotSet,

    /// Expression evaluation failed
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// Any other rule failure
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl RuleError {
    /// Create a recoverable error carrying the output to record
    pub fn non_blocking(message: impl Into<String>, error_output: impl Into<Value>) -> Self {
        RuleError::NonBlocking {
            message: message.into(),
            error_output: error_output.into(),
        }
    }
}

/// Error aborting a decision run
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Value decisions need a `value` input or a default output
    #[error("Missing \"value\" index in input, and no default output given")]
    MissingValueIndex,
}

/// Decision error type
#[derive(Error, Debug)]
pub enum DecisionError {
    /// The input used the reserved `context` key
    #[error("Decision \"{name}\" of type \"{decision_type}\": \"context\" is a reserved index it cannot be used")]
    ReservedContextIndex { name: String, decision_type: String },

    /// `get_context` was called before any `make`
    #[error("Decision \"{name}\" of type \"{decision_type}\": You cannot call get_context() before decision has been made")]
    ContextNotSet { name: String, decision_type: String },

    /// A run failed; wraps the original cause
    #[error("Decision \"{name}\" of type \"{decision_type}\": {source}")]
    UnableToDecide {
        name: String,
        decision_type: String,
        #[source]
        source: EvaluationError,
    },

    /// Unknown decision type identifier
    #[error("Invalid decision type: {0}")]
    InvalidDecisionType(String),

    /// Invalid decision configuration
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, DecisionError>;
