#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod value;

extern crate regex;

pub use interpreter::interpreter::evaluate;

#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Renders an error against the source it came from.
///
/// ```text
/// Error: ZeroDivisionError (Division by zero)
///   |
/// 3 | let y = x / 0
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let line_index = error.get_line() as usize;
    let line_text = source.lines().nth(line_index).unwrap_or("");

    let line_string = (line_index + 1).to_string();
    let padding = line_string.len() + 2;

    let mut result = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };
    result.push_str(&format!("{:>padding$}\n", "|"));
    result.push_str(&format!("{} | {}", line_string, line_text.trim()));

    result
}
