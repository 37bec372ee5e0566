//! Expression parser.
//!
//! This module contains the main Parser struct. The parser walks a token slice
//! and collects one expression at a time, resolving names against the
//! [`Context`] as it goes: calls, constructors, ternaries, lambdas and
//! assignments are evaluated on the spot and enter the expression as plain
//! values, so the evaluator only ever sees literals, operators and parentheses.
//!
//! An expression ends at:
//! - a terminator (`;`, newline or end of input)
//! - a comma or an unmatched closing bracket
//! - two value-like tokens in a row separated by a line break, or followed by `else`

use crate::{
    errors::errors::{Error, ErrorImpl},
    evaluator::{expression::{Element, Expression}, operators::Operator},
    interpreter::context::Context,
    lexer::tokens::{is_bracket_pair, line_table, Token, TokenKind},
    value::value::Item,
};

use super::names::{name_declaration, NameType};

/// The parser structure that maintains parsing state.
///
/// It borrows the token stream, which must end with an EOF token, and the
/// context that names are resolved in.
pub struct Parser<'t, 'c> {
    /// The tokens being parsed
    tokens: &'t [Token],
    /// Current position in the token stream
    pos: usize,
    /// Line of each token, indexed like `tokens`
    lines: Vec<u32>,
    /// Scopes and registries for name resolution and calls
    ctx: &'c mut Context,
}

impl<'t, 'c> Parser<'t, 'c> {
    /// Creates a new Parser positioned at the first token.
    ///
    /// # Panics
    ///
    /// Panics if `tokens` does not end with an EOF token.
    pub fn new(tokens: &'t [Token], ctx: &'c mut Context) -> Self {
        assert!(
            matches!(tokens.last(), Some(token) if token.kind == TokenKind::EOF),
            "token stream must end with EOF"
        );

        Parser {
            tokens,
            pos: 0,
            lines: line_table(tokens),
            ctx,
        }
    }

    pub fn context(&mut self) -> &mut Context {
        &mut *self.ctx
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// Moves the cursor to `pos`, clamped to the EOF token.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len() - 1);
    }

    fn token_at(&self, index: usize) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        &tokens[index.min(tokens.len() - 1)]
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &'t Token {
        self.token_at(self.pos)
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances past the current token and any line breaks after it, returning
    /// the token that was current. Never moves past EOF.
    pub fn advance(&mut self) -> &'t Token {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            return token;
        }

        self.pos += 1;
        self.skip_line_breaks();
        token
    }

    pub fn skip_line_breaks(&mut self) {
        while self.current_token_kind() == TokenKind::EOL {
            self.pos += 1;
        }
    }

    /// Skips newlines and semicolons between statements.
    pub fn skip_statement_breaks(&mut self) {
        while matches!(self.current_token_kind(), TokenKind::EOL | TokenKind::EOE) {
            self.pos += 1;
        }
    }

    /// Expects a token of the specified kind and advances past it.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise a SyntaxError
    /// on the current line.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<&'t Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(self.unexpected(token));
        }

        Ok(self.advance())
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<&'t Token, Error> {
        let token = self.current_token();
        if !token.is_keyword_of(keyword) {
            return Err(self.unexpected(token));
        }

        Ok(self.advance())
    }

    pub fn unexpected(&self, token: &Token) -> Error {
        ErrorImpl::SyntaxError {
            token: token.value.clone(),
        }
        .at(self.line())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Zero-based line of the current token.
    pub fn line(&self) -> u32 {
        self.lines[self.pos.min(self.lines.len() - 1)]
    }

    /// Nearest token before the cursor that is not a line break.
    pub fn previous_token(&self) -> Option<&'t Token> {
        let tokens: &'t [Token] = self.tokens;
        tokens[..self.pos]
            .iter()
            .rev()
            .find(|token| token.kind != TokenKind::EOL)
    }

    /// Nearest token after the cursor that is not a line break.
    pub fn peek(&self) -> &'t Token {
        let tokens: &'t [Token] = self.tokens;
        tokens[self.pos + 1..]
            .iter()
            .find(|token| token.kind != TokenKind::EOL)
            .unwrap_or_else(|| self.token_at(self.pos))
    }

    /// Token right after the cursor, line breaks included.
    pub fn peek_raw(&self) -> &'t Token {
        self.token_at(self.pos + 1)
    }

    /// The cursor sits right after a line break or a semicolon.
    pub fn follows_line_break(&self) -> bool {
        self.pos > 0
            && matches!(
                self.tokens[self.pos - 1].kind,
                TokenKind::EOL | TokenKind::EOE
            )
    }

    /// Decides whether the expression that began at `first` ends at the current
    /// token.
    ///
    /// A value-like token directly after another value-like token ends the
    /// expression when the two are separated by a line break or the second is
    /// `else`; anywhere else the pair is a SyntaxError.
    pub(crate) fn at_boundary(&self, first: usize, brackets_balanced: bool) -> Result<bool, Error> {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            return Ok(true);
        }
        if self.pos == first {
            return Ok(false);
        }

        if token.is_terminator()
            || token.kind == TokenKind::Comma
            || (token.is_right_bracket() && brackets_balanced)
        {
            return Ok(true);
        }

        if let Some(prev) = self.previous_token() {
            let prev_is_value = prev.is_object() || prev.is_right_bracket() || prev.is_keyword();
            let token_is_value = token.is_object()
                || token.is_left_bracket()
                || token.is_keyword()
                || token.is_unary_operator();

            if prev_is_value && token_is_value {
                if self.follows_line_break() || token.is_keyword_of("else") {
                    return Ok(true);
                }
                return Err(self.unexpected(token));
            }
        }

        Ok(false)
    }

    /// Collects one expression starting at the cursor and leaves the cursor on
    /// the token that ended it.
    pub fn parse_expression(&mut self) -> Result<Expression, Error> {
        self.skip_line_breaks();
        let first = self.pos;
        let mut expression = Expression::new(self.line());
        let mut brackets: Vec<&'t Token> = vec![];

        loop {
            if self.at_boundary(first, brackets.is_empty())? {
                break;
            }
            let token = self.current_token();
            track_bracket(&mut brackets, token);

            if token.is_object() && self.peek_raw().kind == TokenKind::OpenParen {
                let item = self.parse_call_site(token)?;
                expression.push_value(item);
                continue;
            }

            if token.is_object() && self.peek().kind == TokenKind::OpenBracket {
                return Err(self.not_implemented("Indexing"));
            }
            if token.kind == TokenKind::OpenBracket {
                return Err(self.not_implemented("Array literals"));
            }

            if token.is_keyword_of("if") {
                let item = self.parse_ternary()?;
                expression.push_value(item);
                continue;
            }
            if token.is_keyword_of("lambda") {
                let function = self.parse_function_declaration()?;
                expression.push_value(Item::Function(function.into()));
                continue;
            }

            if token.is_object() && self.peek().kind == TokenKind::Dot {
                return Err(self.not_implemented("Member access"));
            }

            if token.kind == TokenKind::Name {
                let item = self.parse_name(token)?;
                expression.push_value(item);
                continue;
            }

            if token.is_keyword_of("this") {
                let item = match self.ctx.scopes.lookup("this") {
                    Some(variable) => variable.item.clone(),
                    None => {
                        return Err(ErrorImpl::UndefinedNameUsage {
                            name: String::from("this"),
                        }
                        .at(self.line()))
                    }
                };
                self.advance();
                expression.push_value(item);
                continue;
            }

            let element = self.parse_element(token)?;
            expression.push(element);
            self.advance();
        }

        tracing::trace!(
            elements = expression.content.len(),
            line = expression.line,
            "parsed expression"
        );
        Ok(expression)
    }

    /// `name(` at the cursor: a call to a function or a constructor.
    fn parse_call_site(&mut self, token: &'t Token) -> Result<Item, Error> {
        if token.kind == TokenKind::Name {
            match name_declaration(self.ctx, &token.value) {
                NameType::DeclaredFunction => return Ok(self.parse_function_call()?.item),
                NameType::DeclaredClass => return self.parse_constructor_call(),
                NameType::DeclaredVariable | NameType::Undeclared => {}
            }
        }

        Err(ErrorImpl::CallError {
            name: token.value.clone(),
        }
        .at(self.line()))
    }

    /// A bare name: a variable read or the start of an assignment.
    fn parse_name(&mut self, token: &'t Token) -> Result<Item, Error> {
        let declaration = name_declaration(self.ctx, &token.value);
        if declaration == NameType::Undeclared {
            return Err(ErrorImpl::UndefinedNameUsage {
                name: token.value.clone(),
            }
            .at(self.line()));
        }

        if self.peek().kind == TokenKind::Assignment {
            return self.parse_variable_assignment();
        }

        match self.ctx.scopes.lookup(&token.value) {
            Some(variable) => {
                let item = variable.item.clone();
                self.advance();
                Ok(item)
            }
            // a built-in function or class used as a value
            None => Err(ErrorImpl::CallError {
                name: token.value.clone(),
            }
            .at(self.line())),
        }
    }

    fn parse_element(&self, token: &Token) -> Result<Element, Error> {
        match token.kind {
            TokenKind::OpenParen => Ok(Element::OpenParen),
            TokenKind::CloseParen => Ok(Element::CloseParen),
            TokenKind::Operator => Operator::from_symbol(&token.value)
                .map(Element::Operator)
                .ok_or_else(|| self.unexpected(token)),
            _ if token.is_literal() => Item::from_literal(token)
                .map(Element::Value)
                .map_err(|e| e.at(self.line())),
            _ => Err(self.unexpected(token)),
        }
    }

    fn not_implemented(&self, feature: &str) -> Error {
        ErrorImpl::NotImplementedError {
            feature: feature.to_string(),
        }
        .at(self.line())
    }
}

/// Pops the stack when `token` closes the bracket on top, pushes it otherwise.
pub(crate) fn track_bracket<'t>(brackets: &mut Vec<&'t Token>, token: &'t Token) {
    if !token.is_bracket() {
        return;
    }

    match brackets.last() {
        Some(open) if is_bracket_pair(open, token) => {
            brackets.pop();
        }
        _ => brackets.push(token),
    }
}
