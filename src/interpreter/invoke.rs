use crate::{
    errors::errors::{Error, ErrorImpl},
    scope::scope::VariableObject,
    value::{function::Function, value::{Item, TypeSet, TypeTag}},
};

use super::{context::Context, executor::Outcome};

/// Result of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionReturned {
    pub item: Item,
    /// The body finished without `return`.
    pub is_void: bool,
}

impl FunctionReturned {
    pub fn value(item: Item) -> Self {
        FunctionReturned { item, is_void: false }
    }

    pub fn void() -> Self {
        FunctionReturned {
            item: Item::Unit,
            is_void: true,
        }
    }
}

/// Binds `init` to the parameters of `function` and runs its body.
///
/// Errors raised inside the body come back with their line shifted by the
/// function's start line.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(arity = function.arity(), start_line = function.start_line)
)]
pub fn run_with_args(
    ctx: &mut Context,
    function: &Function,
    init: Vec<Item>,
) -> Result<FunctionReturned, Error> {
    let start = function.start_line;

    if init.len() < function.arity() {
        return Err(ErrorImpl::FunctionArgumentLack {
            expected: function.arity(),
            received: init.len(),
        }
        .at(start));
    }
    if init.len() > function.arity() {
        return Err(ErrorImpl::FunctionArgumentExcess {
            expected: function.arity(),
            received: init.len(),
        }
        .at(start));
    }

    for (arg, item) in function.args.iter().zip(&init) {
        if !arg.ty.accepts(&item.type_tag()) {
            return Err(ErrorImpl::TypeError {
                expected: arg.ty.to_string(),
                received: item.type_tag().to_string(),
            }
            .at(start));
        }
    }

    let variables: Vec<VariableObject> = function
        .args
        .iter()
        .zip(init)
        .map(|(arg, item)| VariableObject {
            name: arg.name.clone(),
            is_mutable: true,
            types: TypeSet::from(arg.ty.clone()),
            item,
        })
        .collect();

    ctx.enter_call(start)?;
    let executor = ctx.executor();
    let result = executor.execute(ctx, &function.body, variables);
    ctx.leave_call();

    match result.map_err(|e| e.rebased(start))? {
        Outcome::Returned(item) => {
            if !function.contains_type(&item.type_tag()) && !function.is_any_type() {
                return Err(ErrorImpl::TypeError {
                    expected: function.return_types.to_string(),
                    received: item.type_tag().to_string(),
                }
                .at(start));
            }
            tracing::debug!(result = %item, "function returned");
            Ok(FunctionReturned::value(item))
        }
        Outcome::Completed(_) => {
            if !function.contains_type(&TypeTag::Unit) && !function.is_any_type() {
                return Err(ErrorImpl::EndOfFunction.at(start));
            }
            Ok(FunctionReturned::void())
        }
    }
}
