//! Aggregation strategies
//!
//! A strategy consumes the output of every evaluated rule, may stop
//! propagation, and computes the final decision output.
//!
//! - `unanimous`: false as soon as one rule is falsy
//! - `affirmative`: true as soon as one rule is truthy
//! - `consensus`: majority vote, ties favor true
//! - `value`: each output becomes the `value` seen by the next rule

mod affirmative;
mod consensus;
mod unanimous;
mod value;

pub use affirmative::AffirmativeStrategy;
pub use consensus::ConsensusStrategy;
pub use unanimous::UnanimousStrategy;
pub use value::ValueStrategy;

use crate::context::Context;
use crate::decision_engine::{DecisionType, Input};
use crate::error::EvaluationError;
use arbiter_core::Value;
use std::fmt;

pub trait Strategy: Send + Sync + fmt::Debug {
    fn decision_type(&self) -> DecisionType;

    /// Reset per-run state before the first rule. May seed the working input.
    fn prepare(
        &mut self,
        input: &mut Input,
        default_output: Option<&Value>,
    ) -> Result<(), EvaluationError>;

    /// Output when no rules are registered and no default output is set
    fn default_output(&self, input: &Input) -> Result<Value, EvaluationError>;

    /// Consume the output of one evaluated rule
    fn handle_rule_output(&mut self, output: &Value, input: &mut Input, context: &mut Context);

    /// Final output once every rule has been processed
    fn output(&self, input: &Input) -> Result<Value, EvaluationError>;
}

/// Create the strategy for a decision type
pub fn create(decision_type: DecisionType) -> Box<dyn Strategy> {
    match decision_type {
        DecisionType::Unanimous => Box::new(UnanimousStrategy::default()),
        DecisionType::Affirmative => Box::new(AffirmativeStrategy::default()),
        DecisionType::Consensus => Box::new(ConsensusStrategy::default()),
        DecisionType::Value => Box::new(ValueStrategy),
    }
}
