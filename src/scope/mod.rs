//! Lexical scopes and variable bindings.

pub mod scope;
