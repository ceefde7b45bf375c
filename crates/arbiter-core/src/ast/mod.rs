//! Expression AST
//!
//! Parsed form of the expressions evaluated by expression-language rules.

pub mod expression;
pub mod operator;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
