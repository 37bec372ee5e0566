//! Stack machine over postfix expressions.
//!
//! Binary operands are popped right-hand first: the value pushed last is the one
//! written closest to the operator's right in the source.

use crate::{
    errors::errors::{Error, ErrorImpl},
    value::value::{Item, TypeTag},
};

use super::{
    expression::{Element, Expression},
    operators::{possible_operations, Operator},
    postfix::into_postfix_notation,
};

/// Longest string, in bytes, that repetition may produce.
pub const MAX_REPEAT_LEN: usize = 1 << 24;

pub fn calculate(expression: &Expression) -> Result<Item, Error> {
    let line = expression.line;
    let postfix_notation = into_postfix_notation(&expression.content).map_err(|e| e.at(line))?;

    let mut values: Vec<Item> = vec![];
    for element in postfix_notation {
        match element {
            Element::Value(item) => values.push(item),
            Element::Operator(operator) => {
                let right = values.pop().ok_or_else(|| missing_operand(operator).at(line))?;

                let result = match (operator.is_unary(), values.pop()) {
                    (false, Some(left)) => process(left, right, operator),
                    (true, Some(left)) => {
                        values.push(left);
                        process_unary(right, operator)
                    }
                    (_, None) => process_unary(right, operator),
                };

                values.push(result.map_err(|e| e.at(line))?);
            }
            Element::OpenParen | Element::CloseParen => {
                return Err(ErrorImpl::SyntaxError { token: String::from("(") }.at(line));
            }
        }
    }

    if values.len() != 1 {
        return Err(ErrorImpl::RuntimeError {
            message: format!("expression left {} values instead of one", values.len()),
        }
        .at(line));
    }

    let result = values.pop().unwrap_or(Item::Unit);
    tracing::trace!(%result, "calculated expression");
    Ok(result)
}

fn missing_operand(operator: Operator) -> ErrorImpl {
    ErrorImpl::RuntimeError {
        message: format!("operator `{}` has no operand", operator),
    }
}

fn overflow(operation: &str) -> ErrorImpl {
    ErrorImpl::RuntimeError {
        message: format!("integer overflow in {}", operation),
    }
}

fn possible_to_process(left: &TypeTag, right: &TypeTag, operator: Operator) -> bool {
    if left == right || (left.is_number() && right.is_number()) {
        return true;
    }
    match operator {
        Operator::Mul => matches!(
            (left, right),
            (TypeTag::String, TypeTag::Int) | (TypeTag::Int, TypeTag::String)
        ),
        Operator::Add => matches!(
            (left, right),
            (TypeTag::Char, TypeTag::String) | (TypeTag::String, TypeTag::Char)
        ),
        _ => false,
    }
}

/// Applies a binary operator to `left` and `right` (in source order).
pub fn process(left: Item, right: Item, operator: Operator) -> Result<Item, ErrorImpl> {
    let (left_type, right_type) = (left.type_tag(), right.type_tag());
    if !possible_to_process(&left_type, &right_type, operator) {
        return Err(ErrorImpl::TypeError {
            expected: left_type.to_string(),
            received: right_type.to_string(),
        });
    }

    match (operator, &left, &right) {
        (Operator::Mul, Item::String(s), Item::Int(n))
        | (Operator::Mul, Item::Int(n), Item::String(s)) => {
            return repeat(s, *n);
        }
        (Operator::Add, Item::Char(c), Item::String(s)) => {
            return Ok(Item::String(format!("{}{}", c, s)))
        }
        (Operator::Add, Item::String(s), Item::Char(c)) => {
            return Ok(Item::String(format!("{}{}", s, c)))
        }
        _ => {}
    }

    let widens = left_type == TypeTag::Float || right_type == TypeTag::Float;
    let category = if left_type.is_number() && widens {
        TypeTag::Float
    } else {
        left_type
    };
    if !possible_operations(&category).contains(&operator) {
        return Err(ErrorImpl::OperandTypeError {
            operator: operator.to_string(),
            operand: category.to_string(),
        });
    }

    match (left, right) {
        (Item::Int(x), Item::Int(y)) => int_operation(x, y, operator),
        (Item::Float(x), Item::Float(y)) => float_operation(x, y, operator),
        (Item::Int(x), Item::Float(y)) => float_operation(x as f64, y, operator),
        (Item::Float(x), Item::Int(y)) => float_operation(x, y as f64, operator),
        (Item::Bool(x), Item::Bool(y)) => bool_operation(x, y, operator),
        (Item::String(x), Item::String(y)) => string_operation(x, &y, operator),
        (Item::Char(x), Item::Char(y)) => char_operation(x, y, operator),
        (left, _) => Err(ErrorImpl::OperandTypeError {
            operator: operator.to_string(),
            operand: left.type_tag().to_string(),
        }),
    }
}

fn repeat(s: &str, count: i64) -> Result<Item, ErrorImpl> {
    let Ok(times) = usize::try_from(count) else {
        return Err(ErrorImpl::IncorrectOperationArguments {
            operator: Operator::Mul.to_string(),
            operand: format!("String and negative Int {}", count),
        });
    };

    match s.len().checked_mul(times) {
        Some(len) if len <= MAX_REPEAT_LEN => Ok(Item::String(s.repeat(times))),
        _ => Err(ErrorImpl::RuntimeError {
            message: format!("string repetition by {} exceeds {} bytes", count, MAX_REPEAT_LEN),
        }),
    }
}

fn compare<T: PartialOrd>(x: T, y: T, operator: Operator) -> bool {
    match operator {
        Operator::Less => x < y,
        Operator::LessEquals => x <= y,
        Operator::Greater => x > y,
        Operator::GreaterEquals => x >= y,
        Operator::Equals => x == y,
        _ => x != y,
    }
}

fn int_operation(x: i64, y: i64, operator: Operator) -> Result<Item, ErrorImpl> {
    if matches!(operator, Operator::Div | Operator::Mod) && y == 0 {
        return Err(ErrorImpl::ZeroDivisionError);
    }
    if operator.is_comparison() {
        return Ok(Item::Bool(compare(x, y, operator)));
    }

    let result = match operator {
        Operator::Add => x.checked_add(y).ok_or_else(|| overflow("addition"))?,
        Operator::Sub => x.checked_sub(y).ok_or_else(|| overflow("subtraction"))?,
        Operator::Mul => x.checked_mul(y).ok_or_else(|| overflow("multiplication"))?,
        Operator::Div => x.checked_div(y).ok_or_else(|| overflow("division"))?,
        Operator::Mod => x.checked_rem(y).ok_or_else(|| overflow("remainder"))?,
        Operator::Pow => {
            let exponent = u32::try_from(y).map_err(|_| ErrorImpl::RuntimeError {
                message: format!("Int cannot be raised to negative power {}", y),
            })?;
            x.checked_pow(exponent).ok_or_else(|| overflow("exponentiation"))?
        }
        _ => {
            return Err(ErrorImpl::OperandTypeError {
                operator: operator.to_string(),
                operand: TypeTag::Int.to_string(),
            })
        }
    };

    Ok(Item::Int(result))
}

fn float_operation(x: f64, y: f64, operator: Operator) -> Result<Item, ErrorImpl> {
    if matches!(operator, Operator::Div | Operator::Mod) && y == 0.0 {
        return Err(ErrorImpl::ZeroDivisionError);
    }
    if operator.is_comparison() {
        return Ok(Item::Bool(compare(x, y, operator)));
    }

    let result = match operator {
        Operator::Add => x + y,
        Operator::Sub => x - y,
        Operator::Mul => x * y,
        Operator::Div => x / y,
        Operator::Mod => x % y,
        Operator::Pow => x.powf(y),
        _ => {
            return Err(ErrorImpl::OperandTypeError {
                operator: operator.to_string(),
                operand: TypeTag::Float.to_string(),
            })
        }
    };

    Ok(Item::Float(result))
}

fn bool_operation(x: bool, y: bool, operator: Operator) -> Result<Item, ErrorImpl> {
    if operator.is_comparison() {
        return Ok(Item::Bool(compare(x, y, operator)));
    }

    match operator {
        Operator::And => Ok(Item::Bool(x && y)),
        Operator::Or => Ok(Item::Bool(x || y)),
        Operator::Xor => Ok(Item::Bool(x ^ y)),
        _ => Err(ErrorImpl::OperandTypeError {
            operator: operator.to_string(),
            operand: TypeTag::Bool.to_string(),
        }),
    }
}

fn string_operation(x: String, y: &str, operator: Operator) -> Result<Item, ErrorImpl> {
    if operator.is_comparison() {
        return Ok(Item::Bool(compare(x.as_str(), y, operator)));
    }

    match operator {
        Operator::Add => Ok(Item::String(x + y)),
        _ => Err(ErrorImpl::OperandTypeError {
            operator: operator.to_string(),
            operand: TypeTag::String.to_string(),
        }),
    }
}

fn char_operation(x: char, y: char, operator: Operator) -> Result<Item, ErrorImpl> {
    if operator.is_comparison() {
        return Ok(Item::Bool(compare(x, y, operator)));
    }

    let code = match operator {
        Operator::Add => (x as u32).checked_add(y as u32),
        Operator::Sub => (x as u32).checked_sub(y as u32),
        _ => None,
    };

    code.and_then(char::from_u32)
        .map(Item::Char)
        .ok_or_else(|| ErrorImpl::OperandTypeError {
            operator: operator.to_string(),
            operand: TypeTag::Char.to_string(),
        })
}

/// Applies a unary operator, or a binary one that found only a single operand.
pub fn process_unary(operand: Item, operator: Operator) -> Result<Item, ErrorImpl> {
    if !matches!(operand, Item::Int(_) | Item::Float(_) | Item::Bool(_)) {
        return Err(ErrorImpl::IncorrectOperationArguments {
            operator: operator.to_string(),
            operand: operand.type_tag().to_string(),
        });
    }
    if !operator.is_unary() {
        return Err(ErrorImpl::OperationArgumentExcess {
            operator: operator.to_string(),
        });
    }

    match (operand, operator) {
        (Item::Int(x), Operator::UnaryPlus) => Ok(Item::Int(x)),
        (Item::Int(x), Operator::UnaryMinus) => {
            x.checked_neg().map(Item::Int).ok_or_else(|| overflow("negation"))
        }
        (Item::Int(x), _) => Ok(Item::Int(if x == 0 { 1 } else { 0 })),
        (Item::Float(x), Operator::UnaryPlus) => Ok(Item::Float(x)),
        (Item::Float(x), Operator::UnaryMinus) => Ok(Item::Float(-x)),
        (Item::Float(x), _) => Ok(Item::Float(if x == 0.0 { 1.0 } else { 0.0 })),
        (Item::Bool(x), Operator::Not) => Ok(Item::Bool(!x)),
        (operand, operator) => Err(ErrorImpl::IncorrectOperationArguments {
            operator: operator.to_string(),
            operand: operand.type_tag().to_string(),
        }),
    }
}
