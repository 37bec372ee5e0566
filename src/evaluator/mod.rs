//! Expression evaluation.
//!
//! An [`expression::Expression`] collected by the parser is reordered into
//! postfix with a shunting-yard pass driven by the operator table, then run on
//! a value stack. Operator semantics depend on operand types:
//!
//! - Int and Float mix freely, widening to Float
//! - `String * Int` (either order) repeats the string
//! - `Char + String` (either order) prepends or appends the character
//! - Every other mismatched pair is a type error

pub mod evaluator;
pub mod expression;
pub mod operators;
pub mod postfix;
