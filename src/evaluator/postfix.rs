use crate::errors::errors::ErrorImpl;

use super::{expression::Element, operators::Operator};

/// Reorders an infix sequence into postfix (shunting-yard).
///
/// Parentheses never reach the output. Prefix unary operators are pushed
/// without popping anything, since nothing to their left belongs to them.
pub fn into_postfix_notation(input: &[Element]) -> Result<Vec<Element>, ErrorImpl> {
    let mut operations: Vec<Element> = vec![];
    let mut output: Vec<Element> = Vec::with_capacity(input.len());

    for element in input {
        match element {
            Element::OpenParen => operations.push(Element::OpenParen),
            Element::Operator(operator) => {
                if !operator.is_unary() {
                    while let Some(Element::Operator(top)) = operations.last() {
                        if !should_pop(top, operator) {
                            break;
                        }
                        output.push(Element::Operator(*top));
                        operations.pop();
                    }
                }
                operations.push(Element::Operator(*operator));
            }
            Element::CloseParen => loop {
                match operations.pop() {
                    Some(Element::OpenParen) => break,
                    Some(operation) => output.push(operation),
                    None => return Err(ErrorImpl::SyntaxError { token: String::from(")") }),
                }
            },
            Element::Value(_) => output.push(element.clone()),
        }
    }

    while let Some(operation) = operations.pop() {
        if operation == Element::OpenParen {
            return Err(ErrorImpl::SyntaxError { token: String::from("(") });
        }
        output.push(operation);
    }

    tracing::trace!(length = output.len(), "converted expression to postfix");
    Ok(output)
}

fn should_pop(top: &Operator, incoming: &Operator) -> bool {
    if incoming.is_left_associative() {
        top.priority() >= incoming.priority()
    } else {
        top.priority() > incoming.priority()
    }
}
