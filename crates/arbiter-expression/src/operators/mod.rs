//! Operator execution
//!
//! Logical `&&` and `||` short-circuit and are handled by the evaluator;
//! everything else is applied to already evaluated operands here.

mod binary;
mod comparison;
mod unary;

pub(crate) use binary::execute_binary_op;
pub(crate) use comparison::execute_compare;
pub(crate) use unary::execute_unary_op;
