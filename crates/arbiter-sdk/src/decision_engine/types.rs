//! Shared types for DecisionEngine

use crate::error::DecisionError;
use arbiter_core::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Decision input, keyed by variable name
pub type Input = HashMap<String, Value>;

/// Input key reserved for the context injected into expression rules
pub const CONTEXT_KEY: &str = "context";

/// Input key holding the running value of a value decision
pub const VALUE_KEY: &str = "value";

/// Aggregation strategy of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    /// Every supported rule must be truthy
    Unanimous,
    /// At least one supported rule must be truthy
    Affirmative,
    /// Majority of truthy outputs, ties favor true
    Consensus,
    /// Each rule output feeds the next rule
    Value,
}

impl DecisionType {
    /// Every declared decision type
    pub const ALL: [DecisionType; 4] = [
        DecisionType::Unanimous,
        DecisionType::Affirmative,
        DecisionType::Consensus,
        DecisionType::Value,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Unanimous => "unanimous",
            DecisionType::Affirmative => "affirmative",
            DecisionType::Consensus => "consensus",
            DecisionType::Value => "value",
        }
    }
}

impl fmt::Display for DecisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionType {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DecisionType::ALL
            .into_iter()
            .find(|decision_type| decision_type.as_str() == s)
            .ok_or_else(|| DecisionError::InvalidDecisionType(s.to_string()))
    }
}
