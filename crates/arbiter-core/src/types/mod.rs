//! Type system for Arbiter
//!
//! Runtime values flowing between inputs, rules and decisions.

pub mod value;

pub use value::Value;
