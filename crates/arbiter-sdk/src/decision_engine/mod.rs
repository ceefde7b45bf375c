//! DecisionEngine - Main API for making decisions
//!
//! The module is organized into:
//! - `types`: decision types, input alias and reserved input keys
//! - `pipeline`: priority ordering and per-rule outcome handling
//! - `engine`: `DecisionEngine`, one `make` call end to end
//! - `tests`: unit tests (test-only)

mod engine;
mod pipeline;
mod types;

pub use engine::{DecisionEngine, DEFAULT_NAME};
pub use types::{DecisionType, Input, CONTEXT_KEY, VALUE_KEY};

#[cfg(test)]
mod tests;
