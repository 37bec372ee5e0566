//! Integration tests for end-to-end evaluation.
//!
//! These tests run whole programs through `evaluate`: tokenization, expression
//! parsing, name resolution, function calls and the statement executor.

use interpreter::{
    errors::errors::{Error, ErrorImpl},
    evaluate, format_error,
    interpreter::context::{Config, Context},
    scope::scope::VariableObject,
    value::value::Item,
};
use pretty_assertions::assert_eq;

fn print_len(args: Vec<Item>) -> Result<Item, ErrorImpl> {
    match args.as_slice() {
        [Item::String(value)] => Ok(Item::Int(value.chars().count() as i64)),
        [other] => Err(ErrorImpl::TypeError {
            expected: String::from("String"),
            received: other.type_tag().to_string(),
        }),
        _ => Err(ErrorImpl::FunctionArgumentExcess {
            expected: 1,
            received: args.len(),
        }),
    }
}

fn context() -> Context {
    Context::new().with_builtin_function("len", print_len)
}

fn run(source: &str) -> Result<Item, Error> {
    evaluate(&mut context(), source)
}

#[test]
fn test_arithmetic_program() {
    let source = "let a = 7\nlet b = 2\n(a + b) * a % 4 - b ** 3";

    assert_eq!(run(source).unwrap(), Item::Int(-5));
}

#[test]
fn test_lambda_call() {
    let source = "
let add = lambda (a: Int, b: Int) -> Int {
    return a + b
}
add(2, 3) * 2
";

    assert_eq!(run(source).unwrap(), Item::Int(10));
}

#[test]
fn test_recursive_factorial() {
    let source = "
let fact = lambda (n: Int) -> Int {
    return if (n <= 1) 1 else n * fact(n - 1)
}
fact(10)
";

    assert_eq!(run(source).unwrap(), Item::Int(3628800));
}

#[test]
fn test_recursive_fibonacci() {
    let source = "
const fib = lambda (n: Int) -> Int {
    return if (n < 2) n else fib(n - 1) + fib(n - 2)
}
fib(15)
";

    assert_eq!(run(source).unwrap(), Item::Int(610));
}

#[test]
fn test_higher_order_functions() {
    let source = "
let twice = lambda (f: Function, x) {
    return f(f(x))
}
let inc = lambda (n) { return n + 1 }
twice(inc, 5)
";

    assert_eq!(run(source).unwrap(), Item::Int(7));
}

#[test]
fn test_function_returning_lambda() {
    let source = "
let make = lambda () -> Function {
    return lambda (s: String) -> String { return s * 2 }
}
let dup = make()
dup(\"ab\")
";

    assert_eq!(run(source).unwrap(), Item::String("abab".to_string()));
}

const COUNTDOWN: &str = "
let down = lambda (n: Int) -> Int {
    return if (n == 0) 0 else down(n - 1)
}
";

#[test]
fn test_recursion_near_default_depth_limit() {
    let limit = Config::default().max_call_depth;

    let within = format!("{}down({})", COUNTDOWN, limit - 4);
    assert_eq!(run(&within).unwrap(), Item::Int(0));

    let beyond = format!("{}down({})", COUNTDOWN, limit * 3);
    assert_eq!(
        run(&beyond).unwrap_err().get_kind(),
        &ErrorImpl::RuntimeError {
            message: String::from("maximum call depth exceeded")
        }
    );
}

#[test]
fn test_parenthesised_expression_spans_lines() {
    let source = "let t = (1\n+ 2)\nlet u = (t\n  - 1\n  * 2)\nt * 10 + u";

    assert_eq!(run(source).unwrap(), Item::Int(31));
}

#[test]
fn test_builtin_call() {
    assert_eq!(run("len(\"hello\") + 1").unwrap(), Item::Int(6));

    let error = run("\nlen(3)").unwrap_err();
    assert!(matches!(error.get_kind(), ErrorImpl::TypeError { .. }));
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_argument_errors() {
    let source = "let f = lambda (a: Int) -> Int { return a }\n";

    assert!(matches!(
        run(&format!("{}f()", source)).unwrap_err().get_kind(),
        ErrorImpl::FunctionArgumentLack { .. }
    ));
    assert!(matches!(
        run(&format!("{}f(1, 2)", source)).unwrap_err().get_kind(),
        ErrorImpl::FunctionArgumentExcess { .. }
    ));
    assert!(matches!(
        run(&format!("{}f('a')", source)).unwrap_err().get_kind(),
        ErrorImpl::TypeError { .. }
    ));
}

#[test]
fn test_missing_return() {
    let source = "
let f = lambda (a: Int) -> Int {
    a + 1
}
f(1)
";

    let error = run(source).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::EndOfFunction);
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_void_call_in_expression() {
    let source = "
let log = lambda (a) { a }
log(1)
";

    assert_eq!(run(source).unwrap(), Item::Unit);
}

#[test]
fn test_error_inside_function_reports_absolute_line() {
    let source = "let x = 1
let f = lambda () {
    let y = 2
    return y / 0
}
f()";

    let error = run(source).unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::ZeroDivisionError);
    assert_eq!(error.get_line(), 3);
    assert_eq!(
        format_error(&error, source),
        "Error: ZeroDivisionError (Division by zero)\n  |\n4 | return y / 0"
    );
}

#[test]
fn test_function_scope_shadows_globals() {
    let source = "
let x = 1
let f = lambda (x) { return x * 10 }
f(5) + x
";

    assert_eq!(run(source).unwrap(), Item::Int(51));
}

#[test]
fn test_function_sees_caller_bindings() {
    let source = "
let counter = 0
let bump = lambda () { counter = counter + 1 }
bump()
bump()
counter
";

    assert_eq!(run(source).unwrap(), Item::Int(2));
}

#[test]
fn test_declared_globals_persist_across_programs() {
    let mut ctx = context();
    ctx.scopes.declare(VariableObject::new("total", Item::Int(0))).unwrap();

    evaluate(&mut ctx, "total = total + 5").unwrap();
    evaluate(&mut ctx, "total = total * 2").unwrap();

    assert_eq!(ctx.scopes.get("total").item, Item::Int(10));
    assert_eq!(ctx.scopes.depth(), 1);
}

#[test]
fn test_undefined_name_line() {
    let error = run("let a = 1\n\na + b").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UndefinedNameUsage {
            name: String::from("b")
        }
    );
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_tokenize_error() {
    assert!(matches!(
        run("let a = 1 @ 2").unwrap_err().get_kind(),
        ErrorImpl::UnrecognisedToken { .. }
    ));
}

#[test]
fn test_string_and_char_program() {
    let source = "
let greet = lambda (name: String) -> String {
    return \"hi \" + name + '!'
}
greet(\"bob\") * 2
";

    assert_eq!(run(source).unwrap(), Item::String("hi bob!hi bob!".to_string()));
}
