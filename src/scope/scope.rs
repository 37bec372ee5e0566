use std::collections::HashMap;

use crate::{
    errors::errors::ErrorImpl,
    value::value::{Item, TypeSet, TypeTag},
};

/// A named binding in a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableObject {
    pub name: String,
    pub is_mutable: bool,
    pub types: TypeSet,
    pub item: Item,
}

impl VariableObject {
    pub fn new(name: impl Into<String>, item: Item) -> Self {
        VariableObject {
            name: name.into(),
            is_mutable: true,
            types: TypeSet::Any,
            item,
        }
    }

    pub fn is_any_type(&self) -> bool {
        self.types.is_any()
    }

    pub fn add_type(&mut self, tag: TypeTag) {
        self.types.add(tag);
    }

    pub fn contains_type(&self, tag: &TypeTag) -> bool {
        self.types.contains(tag)
    }
}

#[derive(Debug, Default)]
pub struct Scope {
    pub variable_lookup: HashMap<String, VariableObject>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn get_variable(&self, name: &str) -> Option<&VariableObject> {
        self.variable_lookup.get(name)
    }
}

/// Stack of lexical scopes. The innermost scope is the last one; the global
/// scope at the bottom lives as long as the manager.
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
}

impl Default for ScopeManager {
    fn default() -> Self {
        ScopeManager::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        ScopeManager {
            scopes: vec![Scope::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
        tracing::debug!(depth = self.scopes.len(), "pushed scope");
    }

    /// Drops the innermost scope together with its bindings.
    pub fn pop_scope(&mut self) {
        assert!(self.scopes.len() > 1, "attempted to pop the global scope");
        self.scopes.pop();
        tracing::debug!(depth = self.scopes.len(), "popped scope");
    }

    /// Declares a binding in the innermost scope. Shadowing an outer binding is allowed.
    pub fn declare(&mut self, variable: VariableObject) -> Result<(), ErrorImpl> {
        let innermost = self.innermost();
        if innermost.variable_lookup.contains_key(&variable.name) {
            return Err(ErrorImpl::RedefinitionError { name: variable.name });
        }

        innermost.variable_lookup.insert(variable.name.clone(), variable);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<&VariableObject> {
        self.scopes.iter().rev().find_map(|scope| scope.get_variable(name))
    }

    /// Fetches a binding the caller has already proven to exist.
    pub fn get(&self, name: &str) -> &VariableObject {
        self.lookup(name)
            .unwrap_or_else(|| panic!("binding `{}` vanished after it was resolved", name))
    }

    /// Overwrites the value of the innermost binding called `name`.
    pub fn assign(&mut self, name: &str, item: Item) {
        let variable = self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.variable_lookup.get_mut(name))
            .unwrap_or_else(|| panic!("assignment to `{}` which was never declared", name));

        variable.item = item;
    }

    fn innermost(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}
