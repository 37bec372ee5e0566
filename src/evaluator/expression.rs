use crate::value::value::Item;

use super::operators::Operator;

/// One entry of an infix expression as the parser collected it.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Value(Item),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

/// An infix expression in source order, not yet evaluated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expression {
    pub content: Vec<Element>,
    /// Line the expression starts on; evaluation errors are reported here.
    pub line: u32,
}

impl Expression {
    pub fn new(line: u32) -> Self {
        Expression {
            content: vec![],
            line,
        }
    }

    pub fn push(&mut self, element: Element) {
        self.content.push(element);
    }

    pub fn push_value(&mut self, item: Item) {
        self.content.push(Element::Value(item));
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
