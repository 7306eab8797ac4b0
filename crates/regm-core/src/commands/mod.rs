//! Command handlers: each one rebuilds the store, runs one operation, and
//! shapes the result into an `ExecutionOutcome`.

pub(crate) mod probe;
pub(crate) mod registry;
#[cfg(test)]
pub(crate) mod test_support;

use regm_domain::RegistryError;

use crate::core::tooling::outcome::ExecutionOutcome;

/// Positional argument `index`, or a `MissingArgument` naming `what`.
pub(crate) fn pick_arg<'a>(
    args: &'a [String],
    index: usize,
    what: &'static str,
) -> Result<&'a str, RegistryError> {
    args.get(index)
        .map(String::as_str)
        .ok_or(RegistryError::MissingArgument { what })
}

pub(crate) fn rejected(err: &RegistryError) -> ExecutionOutcome {
    tracing::debug!(code = err.code(), %err, "command rejected");
    ExecutionOutcome::from_registry_error(err)
}
