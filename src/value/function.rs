use crate::lexer::tokens::Token;

use super::value::{DeclaredType, TypeSet, TypeTag};

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionArg {
    pub name: String,
    pub ty: DeclaredType,
}

/// A user-defined function value.
///
/// `body` is the token sequence between the braces, terminated by EOF. Lines
/// reported from inside it are relative to `start_line`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub args: Vec<FunctionArg>,
    pub body: Vec<Token>,
    pub return_types: TypeSet,
    pub start_line: u32,
}

impl Function {
    pub fn is_any_type(&self) -> bool {
        self.return_types.is_any()
    }

    pub fn contains_type(&self, tag: &TypeTag) -> bool {
        self.return_types.contains(tag)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}
