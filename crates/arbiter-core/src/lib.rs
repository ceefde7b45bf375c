//! Arbiter Core - Core types shared by the Arbiter decision engine crates
//!
//! This crate provides the fundamental types used across the workspace:
//! - Value types for rule inputs and outputs
//! - Expression AST definitions consumed by expression languages
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::Value;
