use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("let");
        set.insert("const");
        set.insert("return");
        set.insert("if");
        set.insert("else");
        set.insert("lambda");
        set.insert("this");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Name,
    Keyword,
    Operator,

    // Literals
    Int,
    Float,
    String,
    Char,
    Bool,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Comma,
    Dot,
    Colon,
    Arrow,

    EOE, // ;
    EOL, // \n
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn eof() -> Self {
        Token {
            kind: TokenKind::EOF,
            value: String::from("EOF"),
            span: Span::null(),
        }
    }

    fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.contains(&self.kind)
    }

    pub fn is_literal(&self) -> bool {
        self.is_one_of_many(&[
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Bool,
        ])
    }

    /// Names and literals: anything that stands for a value on its own.
    pub fn is_object(&self) -> bool {
        self.kind == TokenKind::Name || self.is_literal()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
    }

    pub fn is_keyword_of(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.value == keyword
    }

    pub fn is_operator(&self) -> bool {
        self.kind == TokenKind::Operator
    }

    pub fn is_unary_operator(&self) -> bool {
        self.is_operator() && matches!(self.value.as_str(), "$+" | "$-" | "!")
    }

    pub fn is_left_bracket(&self) -> bool {
        self.is_one_of_many(&[
            TokenKind::OpenParen,
            TokenKind::OpenBracket,
            TokenKind::OpenCurly,
        ])
    }

    pub fn is_right_bracket(&self) -> bool {
        self.is_one_of_many(&[
            TokenKind::CloseParen,
            TokenKind::CloseBracket,
            TokenKind::CloseCurly,
        ])
    }

    pub fn is_bracket(&self) -> bool {
        self.is_left_bracket() || self.is_right_bracket()
    }

    /// End of a statement: `;`, a newline or the end of input.
    pub fn is_terminator(&self) -> bool {
        self.is_one_of_many(&[TokenKind::EOE, TokenKind::EOL, TokenKind::EOF])
    }
}

pub fn is_bracket_pair(open: &Token, close: &Token) -> bool {
    matches!(
        (open.kind, close.kind),
        (TokenKind::OpenParen, TokenKind::CloseParen)
            | (TokenKind::OpenBracket, TokenKind::CloseBracket)
            | (TokenKind::OpenCurly, TokenKind::CloseCurly)
    )
}

/// Zero-based line of `tokens[index]`, counted as the newlines preceding it.
pub fn line_of(tokens: &[Token], index: usize) -> u32 {
    tokens
        .iter()
        .take(index)
        .filter(|token| token.kind == TokenKind::EOL)
        .count() as u32
}

/// Zero-based line of every token, in one pass: entry `i` equals
/// `line_of(tokens, i)`.
pub fn line_table(tokens: &[Token]) -> Vec<u32> {
    let mut line = 0;
    tokens
        .iter()
        .map(|token| {
            let current = line;
            if token.kind == TokenKind::EOL {
                line += 1;
            }
            current
        })
        .collect()
}
