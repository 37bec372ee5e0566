//! Expression parser.
//!
//! Turns a token stream into evaluator input, one expression at a time:
//!
//! - Names are resolved against the current [`Context`](crate::interpreter::context::Context)
//! - Calls, constructors, ternaries and assignments run while parsing
//! - Lambdas capture their body tokens for later execution

pub mod expr;
pub mod names;
pub mod parser;

#[cfg(test)]
mod tests;
