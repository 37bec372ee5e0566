//! Statement execution.
//!
//! The expression core only needs [`Executor::execute`]. [`BlockExecutor`] is the
//! small statement language shipped with the crate:
//!
//! ```text
//! let x: Int = 1      // mutable binding, optional type
//! const y = x + 1     // immutable binding
//! { ... }             // nested block with its own scope
//! return [expr]
//! expr
//! ```
//!
//! Statements are separated by `;` or newlines.

use crate::{
    errors::errors::{Error, ErrorImpl},
    evaluator::evaluator::calculate,
    lexer::tokens::{Token, TokenKind},
    parser::parser::Parser,
    scope::scope::VariableObject,
    value::value::{DeclaredType, Item, TypeSet},
};

use super::context::Context;

/// How a body finished when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Ran off the end; carries the last expression statement's value.
    Completed(Item),
    /// Left through `return`.
    Returned(Item),
}

pub trait Executor {
    /// Runs `body` with `bindings` installed as a fresh innermost scope, which is
    /// gone again when this returns.
    fn execute(
        &self,
        ctx: &mut Context,
        body: &[Token],
        bindings: Vec<VariableObject>,
    ) -> Result<Outcome, Error>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BlockExecutor;

impl Executor for BlockExecutor {
    fn execute(
        &self,
        ctx: &mut Context,
        body: &[Token],
        bindings: Vec<VariableObject>,
    ) -> Result<Outcome, Error> {
        ctx.scopes.push_scope();
        let result = run_scope(ctx, body, bindings);
        ctx.scopes.pop_scope();
        result
    }
}

fn run_scope(
    ctx: &mut Context,
    body: &[Token],
    bindings: Vec<VariableObject>,
) -> Result<Outcome, Error> {
    for binding in bindings {
        ctx.scopes.declare(binding).map_err(|e| e.at(0))?;
    }

    let mut parser = Parser::new(body, ctx);
    run_block(&mut parser, TokenKind::EOF)
}

fn run_block(parser: &mut Parser, end: TokenKind) -> Result<Outcome, Error> {
    let mut last = Item::Unit;

    loop {
        parser.skip_statement_breaks();
        let kind = parser.current_token_kind();
        if kind == end {
            break;
        }
        if kind == TokenKind::EOF {
            return Err(ErrorImpl::SyntaxError { token: String::from("EOF") }.at(parser.line()));
        }

        match run_statement(parser)? {
            Outcome::Returned(item) => return Ok(Outcome::Returned(item)),
            Outcome::Completed(item) => last = item,
        }
        expect_statement_end(parser)?;
    }

    Ok(Outcome::Completed(last))
}

fn run_statement(parser: &mut Parser) -> Result<Outcome, Error> {
    let token = parser.current_token();

    if token.is_keyword_of("let") || token.is_keyword_of("const") {
        return run_declaration(parser);
    }

    if token.is_keyword_of("return") {
        parser.advance();
        let next = parser.current_token();
        if next.is_terminator() || next.kind == TokenKind::CloseCurly {
            return Ok(Outcome::Returned(Item::Unit));
        }
        let expression = parser.parse_expression()?;
        return Ok(Outcome::Returned(calculate(&expression)?));
    }

    if token.kind == TokenKind::OpenCurly {
        parser.advance();
        parser.context().scopes.push_scope();
        let result = run_block(parser, TokenKind::CloseCurly);
        parser.context().scopes.pop_scope();

        let outcome = result?;
        if let Outcome::Completed(_) = outcome {
            parser.expect(TokenKind::CloseCurly)?;
        }
        return Ok(outcome);
    }

    let expression = parser.parse_expression()?;
    Ok(Outcome::Completed(calculate(&expression)?))
}

fn run_declaration(parser: &mut Parser) -> Result<Outcome, Error> {
    let is_mutable = parser.advance().is_keyword_of("let");
    let line = parser.line();
    let name = parser.expect(TokenKind::Name)?.value.clone();

    let mut types = TypeSet::Any;
    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        let type_name = &parser.expect(TokenKind::Name)?.value;
        types.add_declared(DeclaredType::from_name(type_name));
    }

    parser.expect(TokenKind::Assignment)?;
    let item = calculate(&parser.parse_expression()?)?;
    if !types.accepts(&item.type_tag()) {
        return Err(ErrorImpl::TypeError {
            expected: types.to_string(),
            received: item.type_tag().to_string(),
        }
        .at(line));
    }

    let variable = VariableObject {
        name,
        is_mutable,
        types,
        item,
    };
    parser.context().scopes.declare(variable).map_err(|e| e.at(line))?;

    Ok(Outcome::Completed(Item::Unit))
}

fn expect_statement_end(parser: &Parser) -> Result<(), Error> {
    let token = parser.current_token();
    if token.is_terminator() || token.kind == TokenKind::CloseCurly || parser.follows_line_break() {
        return Ok(());
    }

    Err(ErrorImpl::SyntaxError { token: token.value.clone() }.at(parser.line()))
}
