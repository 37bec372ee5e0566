//! Lexical analysis module for the interpreter.
//!
//! The expression core consumes a flat token stream. This module defines the
//! token model it relies on and a small regex-driven tokenizer that produces it:
//!
//! - Recognition of keywords, names, literals, brackets and operators
//! - Rewriting prefix `+`/`-` into the unary operators `$+`/`$-`; a `+`/`-`
//!   opening a line is prefix unless the line continues inside parentheses
//! - End-of-expression (`;`) and end-of-line tokens for statement breaks
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
