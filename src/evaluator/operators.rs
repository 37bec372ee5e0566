use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::value::value::TypeTag;

lazy_static! {
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, Operator> = {
        let mut map = HashMap::new();
        map.insert("**", Operator::Pow);
        map.insert("$+", Operator::UnaryPlus);
        map.insert("$-", Operator::UnaryMinus);
        map.insert("!", Operator::Not);
        map.insert("*", Operator::Mul);
        map.insert("/", Operator::Div);
        map.insert("%", Operator::Mod);
        map.insert("+", Operator::Add);
        map.insert("-", Operator::Sub);
        map.insert("<", Operator::Less);
        map.insert("<=", Operator::LessEquals);
        map.insert(">", Operator::Greater);
        map.insert(">=", Operator::GreaterEquals);
        map.insert("==", Operator::Equals);
        map.insert("!=", Operator::NotEquals);
        map.insert("&&", Operator::And);
        map.insert("^", Operator::Xor);
        map.insert("||", Operator::Or);
        map
    };
}

/// Operator priority, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum Priority {
    Or,
    Xor,
    And,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Power,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Operator {
    Pow,
    UnaryPlus,
    UnaryMinus,
    Not,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Xor,
    Or,
}

const ARITHMETIC: [Operator; 6] = [
    Operator::Add,
    Operator::Sub,
    Operator::Mul,
    Operator::Div,
    Operator::Mod,
    Operator::Pow,
];

const COMPARISON: [Operator; 6] = [
    Operator::Less,
    Operator::LessEquals,
    Operator::Greater,
    Operator::GreaterEquals,
    Operator::Equals,
    Operator::NotEquals,
];

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        OPERATOR_LOOKUP.get(symbol).copied()
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Pow => "**",
            Operator::UnaryPlus => "$+",
            Operator::UnaryMinus => "$-",
            Operator::Not => "!",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Less => "<",
            Operator::LessEquals => "<=",
            Operator::Greater => ">",
            Operator::GreaterEquals => ">=",
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
            Operator::And => "&&",
            Operator::Xor => "^",
            Operator::Or => "||",
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Operator::Pow => Priority::Power,
            Operator::UnaryPlus | Operator::UnaryMinus | Operator::Not => Priority::Unary,
            Operator::Mul | Operator::Div | Operator::Mod => Priority::Multiplicative,
            Operator::Add | Operator::Sub => Priority::Additive,
            Operator::Less
            | Operator::LessEquals
            | Operator::Greater
            | Operator::GreaterEquals
            | Operator::Equals
            | Operator::NotEquals => Priority::Relational,
            Operator::And => Priority::And,
            Operator::Xor => Priority::Xor,
            Operator::Or => Priority::Or,
        }
    }

    pub fn is_left_associative(&self) -> bool {
        *self != Operator::Pow
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::UnaryPlus | Operator::UnaryMinus | Operator::Not)
    }

    pub fn is_comparison(&self) -> bool {
        COMPARISON.contains(self)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Binary operators a value of type `tag` takes part in.
pub fn possible_operations(tag: &TypeTag) -> Vec<Operator> {
    match tag {
        TypeTag::Int | TypeTag::Float => [ARITHMETIC, COMPARISON].concat(),
        TypeTag::Bool => vec![
            Operator::And,
            Operator::Or,
            Operator::Xor,
            Operator::Equals,
            Operator::NotEquals,
        ],
        TypeTag::String => [&[Operator::Add][..], &COMPARISON[..]].concat(),
        TypeTag::Char => [&[Operator::Add, Operator::Sub][..], &COMPARISON[..]].concat(),
        TypeTag::Function | TypeTag::Unit | TypeTag::Class(_) => vec![],
    }
}
