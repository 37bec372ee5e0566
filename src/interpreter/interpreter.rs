use crate::{
    errors::errors::Error,
    lexer::lexer::tokenize,
    value::value::Item,
};

use super::{context::Context, executor::Outcome};

/// Tokenizes and runs `source` as a program in a fresh scope on top of `ctx`.
///
/// Returns the value of the last expression statement, or of the first
/// top-level `return`.
pub fn evaluate(ctx: &mut Context, source: &str) -> Result<Item, Error> {
    let tokens = tokenize(source.to_string(), None)?;
    tracing::debug!(tokens = tokens.len(), "evaluating program");

    let executor = ctx.executor();
    match executor.execute(ctx, &tokens, vec![])? {
        Outcome::Completed(item) | Outcome::Returned(item) => Ok(item),
    }
}
