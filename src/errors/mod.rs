//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout tokenizing, parsing
//! and evaluation. It includes:
//!
//! - Error structures carrying the zero-based line of the offending token
//! - Specific error variants for every failure the evaluator reports
//! - Helpful error messages and suggestions

pub mod errors;
