//! Value model for the interpreter.
//!
//! Submodules:
//! - value: the `Item` sum type, concrete `TypeTag`s and declared type sets
//! - function: user-defined function values
pub mod function;
pub mod value;
