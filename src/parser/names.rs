use crate::{
    interpreter::context::Context,
    value::value::{Item, TypeTag},
};

/// What a name refers to at the point it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameType {
    DeclaredVariable,
    DeclaredFunction,
    DeclaredClass,
    Undeclared,
}

/// Classifies `name`, checking built-in functions first, then the scope
/// stack, then the class registries.
///
/// A binding counts as a function when it holds one or when its declared
/// types admit one.
pub fn name_declaration(ctx: &Context, name: &str) -> NameType {
    if ctx.registry.has_function(name) {
        return NameType::DeclaredFunction;
    }

    if let Some(variable) = ctx.scopes.lookup(name) {
        if matches!(variable.item, Item::Function(_))
            || variable.contains_type(&TypeTag::Function)
        {
            return NameType::DeclaredFunction;
        }
        return NameType::DeclaredVariable;
    }

    if ctx.registry.has_class(name) {
        return NameType::DeclaredClass;
    }

    NameType::Undeclared
}
