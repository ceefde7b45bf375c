//! Arbiter Expression - Expression language used by expression rules
//!
//! This crate provides the `ExpressionLanguage` capability consumed by the
//! decision engine together with a bundled implementation:
//! - a tokenizer and recursive-descent parser producing `arbiter_core::ast::Expression`
//! - an evaluator over variable bindings
//! - a registry of named functions fed by function providers

pub mod error;
pub mod evaluator;
pub mod function;
pub mod language;
mod lexer;
mod operators;
pub mod parser;
pub mod providers;

// Re-export main types
pub use error::{ExpressionError, Result};
pub use evaluator::Evaluator;
pub use function::{ExpressionFunction, ExpressionFunctionProvider, FunctionRegistry, Variables};
pub use language::{ExpressionLanguage, SimpleExpressionLanguage};
pub use parser::ExpressionParser;
pub use providers::{MathFunctionProvider, ValueFunctionProvider};
