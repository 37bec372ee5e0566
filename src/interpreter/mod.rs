//! Program execution around the expression core: the evaluation context,
//! function invocation and the statement executor.

pub mod context;
pub mod executor;
pub mod interpreter;
pub mod invoke;
