//! Runtime values and their type tags.
//!
//! An [`Item`] is a closed sum over every value the evaluator can hold, so a
//! value's tag is always derived from its payload and can never disagree with it.

use std::{collections::{BTreeSet, HashMap}, fmt::Display, rc::Rc};

use crate::{errors::errors::ErrorImpl, lexer::tokens::{Token, TokenKind}};

use super::function::Function;

/// Concrete type tag of a runtime value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
    Char,
    Function,
    Unit,
    Class(String),
}

impl TypeTag {
    /// Resolves a type name from a declaration. `Any` is not a tag and yields `None`.
    pub fn from_name(name: &str) -> Option<TypeTag> {
        match name {
            "Any" => None,
            "Int" => Some(TypeTag::Int),
            "Float" => Some(TypeTag::Float),
            "Bool" => Some(TypeTag::Bool),
            "String" => Some(TypeTag::String),
            "Char" => Some(TypeTag::Char),
            "Function" => Some(TypeTag::Function),
            "Unit" => Some(TypeTag::Unit),
            class => Some(TypeTag::Class(class.to_string())),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::Class(name) => write!(f, "{}", name),
            tag => write!(f, "{:?}", tag),
        }
    }
}

/// A single declared type: a parameter's annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Any,
    Exact(TypeTag),
}

impl DeclaredType {
    pub fn from_name(name: &str) -> Self {
        match TypeTag::from_name(name) {
            Some(tag) => DeclaredType::Exact(tag),
            None => DeclaredType::Any,
        }
    }

    pub fn accepts(&self, tag: &TypeTag) -> bool {
        match self {
            DeclaredType::Any => true,
            DeclaredType::Exact(declared) => declared == tag,
        }
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeclaredType::Any => write!(f, "Any"),
            DeclaredType::Exact(tag) => write!(f, "{}", tag),
        }
    }
}

/// The set of types a binding or function result may take.
///
/// Starts as `Any`. The first concrete type added closes the set, and a closed
/// set never reopens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeSet {
    #[default]
    Any,
    Closed(BTreeSet<TypeTag>),
}

impl TypeSet {
    pub fn is_any(&self) -> bool {
        matches!(self, TypeSet::Any)
    }

    pub fn add(&mut self, tag: TypeTag) {
        match self {
            TypeSet::Any => *self = TypeSet::Closed(BTreeSet::from([tag])),
            TypeSet::Closed(tags) => {
                tags.insert(tag);
            }
        }
    }

    /// Adds a declared type; `Any` leaves the set as it is.
    pub fn add_declared(&mut self, declared: DeclaredType) {
        if let DeclaredType::Exact(tag) = declared {
            self.add(tag);
        }
    }

    pub fn contains(&self, tag: &TypeTag) -> bool {
        match self {
            TypeSet::Any => false,
            TypeSet::Closed(tags) => tags.contains(tag),
        }
    }

    pub fn accepts(&self, tag: &TypeTag) -> bool {
        self.is_any() || self.contains(tag)
    }
}

impl From<DeclaredType> for TypeSet {
    fn from(declared: DeclaredType) -> Self {
        let mut set = TypeSet::Any;
        set.add_declared(declared);
        set
    }
}

impl Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSet::Any => write!(f, "Any"),
            TypeSet::Closed(tags) => {
                let names: Vec<String> = tags.iter().map(|tag| tag.to_string()).collect();
                write!(f, "{}", names.join(" | "))
            }
        }
    }
}

/// A class instance produced by a constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub class: String,
    pub fields: HashMap<String, Item>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    String(String),
    Function(Rc<Function>),
    Unit,
    Object(Rc<Instance>),
}

impl Item {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Item::Int(_) => TypeTag::Int,
            Item::Float(_) => TypeTag::Float,
            Item::Bool(_) => TypeTag::Bool,
            Item::Char(_) => TypeTag::Char,
            Item::String(_) => TypeTag::String,
            Item::Function(_) => TypeTag::Function,
            Item::Unit => TypeTag::Unit,
            Item::Object(instance) => TypeTag::Class(instance.class.clone()),
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Item::Int(_) | Item::Float(_))
    }

    /// Builds the value a literal token stands for.
    pub fn from_literal(token: &Token) -> Result<Item, ErrorImpl> {
        let parse_error = || ErrorImpl::NumberParseError { token: token.value.clone() };

        match token.kind {
            TokenKind::Int => token.value.parse().map(Item::Int).map_err(|_| parse_error()),
            TokenKind::Float => token.value.parse().map(Item::Float).map_err(|_| parse_error()),
            TokenKind::Bool => Ok(Item::Bool(token.value == "true")),
            TokenKind::String => Ok(Item::String(token.value.clone())),
            TokenKind::Char => {
                let mut chars = token.value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Item::Char(ch)),
                    _ => Err(ErrorImpl::SyntaxError { token: token.value.clone() }),
                }
            }
            _ => Err(ErrorImpl::SyntaxError { token: token.value.clone() }),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Item::Int(a), Item::Int(b)) => a == b,
            (Item::Float(a), Item::Float(b)) => a == b,
            (Item::Bool(a), Item::Bool(b)) => a == b,
            (Item::Char(a), Item::Char(b)) => a == b,
            (Item::String(a), Item::String(b)) => a == b,
            (Item::Function(a), Item::Function(b)) => Rc::ptr_eq(a, b),
            (Item::Unit, Item::Unit) => true,
            (Item::Object(a), Item::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Item::Int(value) => write!(f, "{}", value),
            Item::Float(value) => write!(f, "{}", value),
            Item::Bool(value) => write!(f, "{}", value),
            Item::Char(value) => write!(f, "{}", value),
            Item::String(value) => write!(f, "{}", value),
            Item::Function(function) => write!(f, "<lambda/{}>", function.args.len()),
            Item::Unit => write!(f, "()"),
            Item::Object(instance) => write!(f, "<{}>", instance.class),
        }
    }
}
