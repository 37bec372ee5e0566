use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    line: u32,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: u32) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Zero-based line index of the offending token.
    pub fn get_line(&self) -> u32 {
        self.line
    }

    /// Shifts the error's line by `offset`, used when an error leaves a function body so
    /// that the line is relative to the region the function was declared in.
    pub fn rebased(self, offset: u32) -> Self {
        Error {
            internal_error: self.internal_error,
            line: self.line + offset,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::UndefinedNameUsage { .. } => "UndefinedNameUsage",
            ErrorImpl::CallError { .. } => "CallError",
            ErrorImpl::TypeError { .. } => "TypeError",
            ErrorImpl::OperandTypeError { .. } => "OperandTypeError",
            ErrorImpl::IncorrectOperationArguments { .. } => "IncorrectOperationArguments",
            ErrorImpl::OperationArgumentExcess { .. } => "OperationArgumentExcess",
            ErrorImpl::ZeroDivisionError => "ZeroDivisionError",
            ErrorImpl::RuntimeError { .. } => "RuntimeError",
            ErrorImpl::RedefinitionError { .. } => "RedefinitionError",
            ErrorImpl::ConstantAssignment { .. } => "ConstantAssignment",
            ErrorImpl::FunctionArgumentLack { .. } => "FunctionArgumentLack",
            ErrorImpl::FunctionArgumentExcess { .. } => "FunctionArgumentExcess",
            ErrorImpl::EndOfFunction => "EndOfFunction",
            ErrorImpl::NotImplementedError { .. } => "NotImplementedError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::SyntaxError { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss an operator?",
                token
            )),
            ErrorImpl::UndefinedNameUsage { name } => {
                ErrorTip::Suggestion(format!("Name `{}` is not declared", name))
            }
            ErrorImpl::CallError { name } => {
                ErrorTip::Suggestion(format!("`{}` cannot be called here", name))
            }
            ErrorImpl::TypeError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperandTypeError { operator, operand } => ErrorTip::Suggestion(format!(
                "Operator `{}` is not defined for `{}`",
                operator, operand
            )),
            ErrorImpl::IncorrectOperationArguments { operator, operand } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` cannot be applied to `{}`",
                    operator, operand
                ))
            }
            ErrorImpl::OperationArgumentExcess { operator } => ErrorTip::Suggestion(format!(
                "Operator `{}` needs two operands",
                operator
            )),
            ErrorImpl::ZeroDivisionError => {
                ErrorTip::Suggestion(String::from("Division by zero"))
            }
            ErrorImpl::RuntimeError { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::RedefinitionError { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::ConstantAssignment { variable } => {
                ErrorTip::Suggestion(format!("`{}` is a constant", variable))
            }
            ErrorImpl::FunctionArgumentLack { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::FunctionArgumentExcess { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected {} arguments, received {}",
                    expected, received
                ))
            }
            ErrorImpl::EndOfFunction => ErrorTip::None,
            ErrorImpl::NotImplementedError { feature } => ErrorTip::Suggestion(format!(
                "{} is expected to be handled, but has not yet been implemented",
                feature
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.internal_error, self.line + 1)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("syntax error near {token:?}")]
    SyntaxError { token: String },
    #[error("name {name:?} is not declared")]
    UndefinedNameUsage { name: String },
    #[error("{name:?} is not callable")]
    CallError { name: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeError { expected: String, received: String },
    #[error("operator {operator} is not defined for {operand}")]
    OperandTypeError { operator: String, operand: String },
    #[error("operator {operator} cannot be applied to {operand}")]
    IncorrectOperationArguments { operator: String, operand: String },
    #[error("operator {operator} is missing an operand")]
    OperationArgumentExcess { operator: String },
    #[error("division by zero")]
    ZeroDivisionError,
    #[error("runtime error: {message}")]
    RuntimeError { message: String },
    #[error("{name:?} already declared")]
    RedefinitionError { name: String },
    #[error("cannot assign to constant {variable:?}")]
    ConstantAssignment { variable: String },
    #[error("missing arguments: expected {expected}, received {received}")]
    FunctionArgumentLack { expected: usize, received: usize },
    #[error("unexpected arguments: expected {expected}, received {received}")]
    FunctionArgumentExcess { expected: usize, received: usize },
    #[error("function ended without returning a value")]
    EndOfFunction,
    #[error("not implemented: {feature}")]
    NotImplementedError { feature: String },
}

impl ErrorImpl {
    /// Attaches a line to the error kind.
    pub fn at(self, line: u32) -> Error {
        Error::new(self, line)
    }
}
