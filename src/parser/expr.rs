use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    evaluator::evaluator::calculate,
    interpreter::invoke::{run_with_args, FunctionReturned},
    lexer::tokens::{Token, TokenKind},
    value::{
        function::{Function, FunctionArg},
        value::{DeclaredType, Item, TypeSet, TypeTag},
    },
};

use super::parser::{track_bracket, Parser};

impl<'t, 'c> Parser<'t, 'c> {
    /// Parses and evaluates the comma-separated arguments of a call, starting
    /// at `(` and ending past the matching `)`.
    pub fn parse_call_arguments(&mut self) -> Result<Vec<Item>, Error> {
        self.expect(TokenKind::OpenParen)?;

        let mut args = vec![];
        if self.current_token_kind() == TokenKind::CloseParen {
            self.advance();
            return Ok(args);
        }

        loop {
            let expression = self.parse_expression()?;
            args.push(calculate(&expression)?);

            match self.current_token_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::CloseParen => {
                    self.advance();
                    break;
                }
                _ => return Err(self.unexpected(self.current_token())),
            }
        }

        Ok(args)
    }

    /// `name(args)` where `name` is a built-in or a binding holding a function.
    pub fn parse_function_call(&mut self) -> Result<FunctionReturned, Error> {
        let line = self.line();
        let name = &self.advance().value;
        let args = self.parse_call_arguments()?;

        if let Some(builtin) = self.context().registry.get_function(name) {
            let item = builtin(args).map_err(|e| e.at(line))?;
            if item == Item::Unit {
                return Ok(FunctionReturned::void());
            }
            return Ok(FunctionReturned::value(item));
        }

        let function = match self.context().scopes.lookup(name).map(|variable| &variable.item) {
            Some(Item::Function(function)) => Rc::clone(function),
            _ => return Err(ErrorImpl::CallError { name: name.clone() }.at(line)),
        };

        tracing::debug!(name = %name, line, "calling function");
        run_with_args(self.context(), &function, args)
    }

    /// `Name(args)` where `Name` is a registered class.
    pub fn parse_constructor_call(&mut self) -> Result<Item, Error> {
        let line = self.line();
        let name = &self.advance().value;
        let args = self.parse_call_arguments()?;

        match self.context().registry.get_constructor(name) {
            Some(constructor) => constructor(args).map_err(|e| e.at(line)),
            None => Err(ErrorImpl::CallError { name: name.clone() }.at(line)),
        }
    }

    /// `if ( cond ) then else otherwise`. Only the selected branch is evaluated;
    /// the other one is skipped without running any calls in it.
    pub fn parse_ternary(&mut self) -> Result<Item, Error> {
        let line = self.line();
        self.expect_keyword("if")?;
        self.expect(TokenKind::OpenParen)?;
        let condition = calculate(&self.parse_expression()?)?;
        self.expect(TokenKind::CloseParen)?;

        let condition = match condition {
            Item::Bool(value) => value,
            other => {
                return Err(ErrorImpl::TypeError {
                    expected: TypeTag::Bool.to_string(),
                    received: other.type_tag().to_string(),
                }
                .at(line))
            }
        };

        if condition {
            let item = calculate(&self.parse_expression()?)?;
            self.expect_keyword("else")?;
            self.skip_expression()?;
            Ok(item)
        } else {
            self.skip_expression()?;
            self.expect_keyword("else")?;
            calculate(&self.parse_expression()?)
        }
    }

    /// Moves past one expression using the same boundary rules as
    /// [`Parser::parse_expression`], without resolving names or evaluating.
    pub fn skip_expression(&mut self) -> Result<(), Error> {
        self.skip_line_breaks();
        let first = self.position();
        let mut brackets: Vec<&'t Token> = vec![];

        loop {
            if self.at_boundary(first, brackets.is_empty())? {
                break;
            }
            let token = self.current_token();

            if token.is_object() && self.peek_raw().kind == TokenKind::OpenParen {
                self.advance();
                self.skip_group()?;
                continue;
            }
            if token.is_keyword_of("if") {
                self.skip_ternary()?;
                continue;
            }
            if token.is_keyword_of("lambda") {
                self.parse_function_declaration()?;
                continue;
            }

            track_bracket(&mut brackets, token);
            self.advance();
        }

        Ok(())
    }

    fn skip_ternary(&mut self) -> Result<(), Error> {
        self.expect_keyword("if")?;
        self.skip_group()?;
        self.skip_expression()?;
        self.expect_keyword("else")?;
        self.skip_expression()
    }

    /// Skips a balanced `( ... )` group starting at the cursor.
    fn skip_group(&mut self) -> Result<(), Error> {
        let open = self.expect(TokenKind::OpenParen)?;
        let mut depth = 1usize;

        while depth > 0 {
            let token = self.current_token();
            match token.kind {
                TokenKind::EOF => return Err(self.unexpected(open)),
                TokenKind::OpenParen => depth += 1,
                TokenKind::CloseParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }

        Ok(())
    }

    /// `lambda (p[: T], ...) [-> T | -> (T, ...)] { body }`.
    ///
    /// The body is captured as raw tokens, line breaks included, and runs only
    /// when the function is called.
    pub fn parse_function_declaration(&mut self) -> Result<Function, Error> {
        self.expect_keyword("lambda")?;
        self.expect(TokenKind::OpenParen)?;

        let mut args = vec![];
        while self.current_token_kind() != TokenKind::CloseParen {
            let name = self.expect(TokenKind::Name)?.value.clone();
            let ty = self.parse_type_annotation()?;
            args.push(FunctionArg { name, ty });

            match self.current_token_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::CloseParen => {}
                _ => return Err(self.unexpected(self.current_token())),
            }
        }
        self.expect(TokenKind::CloseParen)?;

        let mut return_types = TypeSet::Any;
        if self.current_token_kind() == TokenKind::Arrow {
            self.advance();
            if self.current_token_kind() == TokenKind::OpenParen {
                self.advance();
                loop {
                    let name = &self.expect(TokenKind::Name)?.value;
                    return_types.add_declared(DeclaredType::from_name(name));
                    match self.current_token_kind() {
                        TokenKind::Comma => {
                            self.advance();
                        }
                        TokenKind::CloseParen => break,
                        _ => return Err(self.unexpected(self.current_token())),
                    }
                }
                self.expect(TokenKind::CloseParen)?;
            } else {
                let name = &self.expect(TokenKind::Name)?.value;
                return_types.add_declared(DeclaredType::from_name(name));
            }
        }

        if self.current_token_kind() != TokenKind::OpenCurly {
            return Err(self.unexpected(self.current_token()));
        }
        let start_line = self.line();
        let open = self.position();
        let close = self.matching_curly(open)?;

        let mut body = self.tokens()[open + 1..close].to_vec();
        body.push(Token::eof());

        self.seek(close);
        self.advance();

        Ok(Function {
            args,
            body,
            return_types,
            start_line,
        })
    }

    fn parse_type_annotation(&mut self) -> Result<DeclaredType, Error> {
        if self.current_token_kind() != TokenKind::Colon {
            return Ok(DeclaredType::Any);
        }

        self.advance();
        let name = &self.expect(TokenKind::Name)?.value;
        Ok(DeclaredType::from_name(name))
    }

    fn matching_curly(&self, open: usize) -> Result<usize, Error> {
        let mut depth = 0usize;
        for (index, token) in self.tokens().iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                _ => {}
            }
        }

        Err(self.unexpected(&self.tokens()[open]))
    }

    /// `name = expr`. The new value is also the value of the whole assignment.
    pub fn parse_variable_assignment(&mut self) -> Result<Item, Error> {
        let line = self.line();
        let name = &self.advance().value;
        self.expect(TokenKind::Assignment)?;

        match self.context().scopes.lookup(name) {
            None => return Err(ErrorImpl::UndefinedNameUsage { name: name.clone() }.at(line)),
            Some(variable) if !variable.is_mutable => {
                return Err(ErrorImpl::ConstantAssignment { variable: name.clone() }.at(line))
            }
            Some(_) => {}
        }

        let item = calculate(&self.parse_expression()?)?;
        self.context().scopes.assign(name, item.clone());
        Ok(item)
    }
}
