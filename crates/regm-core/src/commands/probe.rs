use anyhow::Result;
use serde_json::json;

use super::rejected;
use crate::core::config::context::CommandContext;
use crate::core::probe::{plan_targets, probe_aliases, ProbeReporter, ProbeState, SilentReporter};
use crate::core::tooling::outcome::ExecutionOutcome;

#[derive(Clone, Debug, Default)]
pub struct ProbeRequest {
    pub args: Vec<String>,
}

/// Probes one alias (`args[0]`) or every known alias, reporting each result
/// as it lands unless the context asks for machine or quiet output.
/// Unreachable registries do not fail the command.
pub fn probe_registries(
    ctx: &CommandContext,
    request: &ProbeRequest,
    reporter: &dyn ProbeReporter,
) -> Result<ExecutionOutcome> {
    let store = ctx.load_store();
    let targets = match plan_targets(&store, request.args.first().map(String::as_str)) {
        Ok(targets) => targets,
        Err(err) => return Ok(rejected(&err)),
    };

    let reporter: &dyn ProbeReporter = if ctx.streams_progress() {
        reporter
    } else {
        &SilentReporter
    };
    let results = probe_aliases(&targets, ctx.probe(), reporter);
    let count = |state: ProbeState| results.iter().filter(|r| r.state == state).count();
    let ok = count(ProbeState::Success);
    let failed = count(ProbeState::Failed);
    let timed_out = count(ProbeState::TimedOut);
    tracing::debug!(ok, failed, timed_out, "probe finished");

    Ok(ExecutionOutcome::success(
        format!(
            "probed {} registries: {ok} ok, {failed} failed, {timed_out} timed out",
            results.len()
        ),
        json!({
            "results": results,
            "summary": {
                "ok": ok,
                "failed": failed,
                "timed_out": timed_out,
            },
        }),
    ))
}
