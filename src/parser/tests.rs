//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Name resolution and variable reads
//! - Calls to built-in functions and constructors
//! - Assignments and constant bindings
//! - Ternaries, including skipping the untaken branch
//! - Lambda declarations
//! - Expression boundaries

use std::{collections::HashMap, rc::Rc};

use pretty_assertions::assert_eq;

use crate::{
    errors::errors::{Error, ErrorImpl},
    evaluator::{evaluator::calculate, expression::Element},
    interpreter::context::Context,
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    scope::scope::VariableObject,
    value::value::{DeclaredType, Instance, Item, TypeSet, TypeTag},
};

use super::{
    names::{name_declaration, NameType},
    parser::Parser,
};

fn double(args: Vec<Item>) -> Result<Item, ErrorImpl> {
    match args.as_slice() {
        [Item::Int(value)] => Ok(Item::Int(value * 2)),
        _ => Err(ErrorImpl::RuntimeError {
            message: String::from("double expects one Int"),
        }),
    }
}

fn boom(_args: Vec<Item>) -> Result<Item, ErrorImpl> {
    Err(ErrorImpl::RuntimeError {
        message: String::from("boom"),
    })
}

fn point(args: Vec<Item>) -> Result<Item, ErrorImpl> {
    let fields: HashMap<String, Item> = ["x", "y"]
        .iter()
        .map(|name| name.to_string())
        .zip(args)
        .collect();

    Ok(Item::Object(Rc::new(Instance {
        class: String::from("Point"),
        fields,
    })))
}

fn context() -> Context {
    let mut ctx = Context::new()
        .with_builtin_function("double", double)
        .with_builtin_function("boom", boom)
        .with_user_class("Point", point);

    ctx.scopes.declare(VariableObject::new("x", Item::Int(5))).unwrap();
    ctx.scopes.declare(VariableObject::new("y", Item::Int(0))).unwrap();
    ctx.scopes
        .declare(VariableObject {
            name: String::from("limit"),
            is_mutable: false,
            types: TypeSet::Any,
            item: Item::Int(10),
        })
        .unwrap();
    ctx
}

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), None).unwrap()
}

fn eval_in(ctx: &mut Context, source: &str) -> Result<Item, Error> {
    let tokens = tokens(source);
    let mut parser = Parser::new(&tokens, ctx);
    let expression = parser.parse_expression()?;
    calculate(&expression)
}

fn eval(source: &str) -> Item {
    eval_in(&mut context(), source).unwrap()
}

fn eval_error(source: &str) -> ErrorImpl {
    eval_in(&mut context(), source).unwrap_err().get_kind().clone()
}

#[test]
fn test_name_declaration_order() {
    let mut ctx = context();
    ctx.scopes
        .declare(VariableObject {
            name: String::from("callback"),
            is_mutable: true,
            types: TypeSet::from(DeclaredType::Exact(TypeTag::Function)),
            item: Item::Unit,
        })
        .unwrap();

    assert_eq!(name_declaration(&ctx, "double"), NameType::DeclaredFunction);
    assert_eq!(name_declaration(&ctx, "callback"), NameType::DeclaredFunction);
    assert_eq!(name_declaration(&ctx, "x"), NameType::DeclaredVariable);
    assert_eq!(name_declaration(&ctx, "Point"), NameType::DeclaredClass);
    assert_eq!(name_declaration(&ctx, "nothing"), NameType::Undeclared);
}

#[test]
fn test_variable_read() {
    assert_eq!(eval("x + 1"), Item::Int(6));
    assert_eq!(eval("(x - 1) * x"), Item::Int(20));
}

#[test]
fn test_undefined_name() {
    assert_eq!(
        eval_error("z + 1"),
        ErrorImpl::UndefinedNameUsage {
            name: String::from("z")
        }
    );
}

#[test]
fn test_builtin_call() {
    assert_eq!(eval("double(3) + 1"), Item::Int(7));
    assert_eq!(eval("double(double(x))"), Item::Int(20));
    assert_eq!(eval("double((1 + 2) * 2)"), Item::Int(12));
}

#[test]
fn test_builtin_error_gets_call_line() {
    let error = eval_in(&mut context(), "\n\nboom()").unwrap_err();

    assert_eq!(error.get_line(), 2);
    assert!(matches!(error.get_kind(), ErrorImpl::RuntimeError { .. }));
}

#[test]
fn test_builtin_used_as_value() {
    assert!(matches!(eval_error("double + 1"), ErrorImpl::CallError { .. }));
}

#[test]
fn test_calling_a_non_function() {
    assert!(matches!(eval_error("x(1)"), ErrorImpl::CallError { .. }));
    assert!(matches!(eval_error("nothing(1)"), ErrorImpl::CallError { .. }));
    assert!(matches!(eval_error("3(1)"), ErrorImpl::CallError { .. }));
}

#[test]
fn test_constructor_call() {
    let item = eval("Point(1, 2)");

    match item {
        Item::Object(instance) => {
            assert_eq!(instance.class, "Point");
            assert_eq!(instance.fields.get("y"), Some(&Item::Int(2)));
        }
        other => panic!("expected an object, got {:?}", other),
    }
}

#[test]
fn test_assignment() {
    let mut ctx = context();

    assert_eq!(eval_in(&mut ctx, "x = x + 1").unwrap(), Item::Int(6));
    assert_eq!(ctx.scopes.get("x").item, Item::Int(6));
}

#[test]
fn test_chained_assignment() {
    let mut ctx = context();

    assert_eq!(eval_in(&mut ctx, "x = y = 3").unwrap(), Item::Int(3));
    assert_eq!(ctx.scopes.get("x").item, Item::Int(3));
    assert_eq!(ctx.scopes.get("y").item, Item::Int(3));
}

#[test]
fn test_assignment_does_not_check_types() {
    let mut ctx = context();

    assert_eq!(eval_in(&mut ctx, "x = \"five\"").unwrap(), Item::String("five".to_string()));
}

#[test]
fn test_constant_assignment() {
    let mut ctx = context();

    assert!(matches!(
        eval_in(&mut ctx, "limit = 11").unwrap_err().get_kind(),
        ErrorImpl::ConstantAssignment { .. }
    ));
    assert_eq!(ctx.scopes.get("limit").item, Item::Int(10));
}

#[test]
fn test_this_binding() {
    assert!(matches!(eval_error("this"), ErrorImpl::UndefinedNameUsage { .. }));

    let mut ctx = context();
    ctx.scopes.declare(VariableObject::new("this", Item::Int(42))).unwrap();
    assert_eq!(eval_in(&mut ctx, "this + 1").unwrap(), Item::Int(43));
}

#[test]
fn test_ternary() {
    assert_eq!(eval("if (x > 3) 1 else 2"), Item::Int(1));
    assert_eq!(eval("if (x > 30) 1 else 2"), Item::Int(2));
    assert_eq!(eval("10 + if (true) 1 else 2"), Item::Int(11));
}

#[test]
fn test_nested_ternary() {
    assert_eq!(eval("if (x > 3) if (x > 4) 1 else 2 else 3"), Item::Int(1));
    assert_eq!(eval("if (false) 0 else if (false) 1 else 2"), Item::Int(2));
}

#[test]
fn test_ternary_skips_untaken_branch() {
    assert_eq!(eval("if (true) 1 else boom()"), Item::Int(1));
    assert_eq!(eval("if (false) boom() + 1 else 2"), Item::Int(2));
    assert_eq!(eval("if (false) double(boom()) else 3"), Item::Int(3));
}

#[test]
fn test_ternary_condition_must_be_bool() {
    assert!(matches!(eval_error("if (1) 1 else 2"), ErrorImpl::TypeError { .. }));
}

#[test]
fn test_lambda_declaration() {
    let mut ctx = context();
    let tokens = tokens("lambda (a: Int, b) -> Int { return a + b }");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let expression = parser.parse_expression().unwrap();

    let function = match expression.content.as_slice() {
        [Element::Value(Item::Function(function))] => Rc::clone(function),
        other => panic!("expected a single function value, got {:?}", other),
    };

    assert_eq!(function.arity(), 2);
    assert_eq!(function.args[0].ty, DeclaredType::Exact(TypeTag::Int));
    assert_eq!(function.args[1].ty, DeclaredType::Any);
    assert!(function.contains_type(&TypeTag::Int));
    assert_eq!(function.start_line, 0);
    assert_eq!(function.body.first().map(|t| t.value.as_str()), Some("return"));
    assert_eq!(function.body.last().map(|t| t.kind), Some(TokenKind::EOF));
}

#[test]
fn test_lambda_multiple_return_types() {
    let mut ctx = context();
    let tokens = tokens("lambda () -> (Int, Unit) { }");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let function = parser.parse_function_declaration().unwrap();

    assert!(function.contains_type(&TypeTag::Int));
    assert!(function.contains_type(&TypeTag::Unit));
    assert!(!function.contains_type(&TypeTag::Float));
    assert_eq!(function.body.len(), 1);
}

#[test]
fn test_lambda_start_line_is_opening_brace() {
    let mut ctx = context();
    let tokens = tokens("lambda ()\n\n{\n  return 1\n}");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let function = parser.parse_function_declaration().unwrap();

    assert_eq!(function.start_line, 2);
    assert!(function.is_any_type());
    assert!(!parser.has_tokens());
}

#[test]
fn test_lambda_unclosed_body() {
    assert!(matches!(eval_error("lambda () { return 1"), ErrorImpl::SyntaxError { .. }));
}

#[test]
fn test_expression_stops_at_comma() {
    let mut ctx = context();
    let tokens = tokens("1 + 2, 3");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let expression = parser.parse_expression().unwrap();

    assert_eq!(calculate(&expression).unwrap(), Item::Int(3));
    assert_eq!(parser.current_token_kind(), TokenKind::Comma);
}

#[test]
fn test_expression_stops_at_line_break_between_values() {
    let mut ctx = context();
    let tokens = tokens("x\n2");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let expression = parser.parse_expression().unwrap();

    assert_eq!(calculate(&expression).unwrap(), Item::Int(5));
    assert_eq!(parser.current_token().value, "2");
}

#[test]
fn test_expression_continues_after_trailing_operator() {
    assert_eq!(eval("1 +\n2"), Item::Int(3));
}

#[test]
fn test_expression_continues_inside_parentheses() {
    assert_eq!(eval("(x\n- 1)"), Item::Int(4));
    assert_eq!(eval("(1\n+ 2) * 2"), Item::Int(6));
}

#[test]
fn test_adjacent_values_on_one_line() {
    assert!(matches!(eval_error("1 2"), ErrorImpl::SyntaxError { .. }));
    assert!(matches!(eval_error("x (1)"), ErrorImpl::CallError { .. }));
}

#[test]
fn test_leading_terminators() {
    assert!(matches!(eval_error(", 1"), ErrorImpl::SyntaxError { .. }));
    assert!(matches!(eval_error(") 1"), ErrorImpl::SyntaxError { .. }));
}

#[test]
fn test_unbalanced_parentheses() {
    assert!(matches!(eval_error("(1 + 2"), ErrorImpl::SyntaxError { .. }));
}

#[test]
fn test_unsupported_forms() {
    assert!(matches!(eval_error("x[0]"), ErrorImpl::NotImplementedError { .. }));
    assert!(matches!(eval_error("[1]"), ErrorImpl::NotImplementedError { .. }));
    assert!(matches!(eval_error("x.y"), ErrorImpl::NotImplementedError { .. }));
}

#[test]
fn test_stray_tokens() {
    assert!(matches!(eval_error("1 + {"), ErrorImpl::SyntaxError { .. }));
    assert!(matches!(eval_error("1 : 2"), ErrorImpl::SyntaxError { .. }));
}

#[test]
fn test_expression_line() {
    let error = eval_in(&mut context(), "\n\n1 / 0").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::ZeroDivisionError);
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_line_follows_cursor() {
    let mut ctx = context();
    let tokens = tokens("x\n\n(x\n+ 1)\n");
    let mut parser = Parser::new(&tokens, &mut ctx);
    let plus = tokens.iter().position(|token| token.value == "+").unwrap();

    assert_eq!(parser.line(), 0);
    parser.seek(plus);
    assert_eq!(parser.line(), 3);
    parser.seek(0);
    assert_eq!(parser.line(), 0);
    parser.seek(usize::MAX);
    assert_eq!(parser.current_token_kind(), TokenKind::EOF);
    assert_eq!(parser.line(), 4);
}

#[test]
fn test_skip_expression() {
    let mut ctx = context();
    let tokens = tokens("double(1, 2) + if (x) boom() else 3; 4");
    let mut parser = Parser::new(&tokens, &mut ctx);
    parser.skip_expression().unwrap();

    assert_eq!(parser.current_token_kind(), TokenKind::EOE);
}
