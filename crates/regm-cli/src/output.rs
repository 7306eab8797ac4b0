use color_eyre::Result;
use regm_core::{
    CommandGroup, CommandInfo, CommandStatus, ExecutionOutcome, ProbeReporter, ProbeResult,
};
use serde_json::Value;

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
}

/// Prints each probe line as soon as a printer thread hands it over.
pub struct StyledProbeReporter {
    style: Style,
}

impl StyledProbeReporter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl ProbeReporter for StyledProbeReporter {
    fn report(&self, result: &ProbeResult) {
        println!("{}", self.style.probe_line(result.state, &result.line));
    }
}

pub fn emit_output(
    opts: &OutputOptions,
    style: &Style,
    info: CommandInfo,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = outcome.status.exit_code();

    if opts.json {
        let payload = regm_core::to_json_response(info, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }
    if opts.quiet {
        return Ok(code);
    }

    if outcome.status == CommandStatus::Ok {
        if info.group == CommandGroup::List {
            for line in render_listing(style, &outcome.details) {
                println!("{line}");
            }
        } else {
            let message = regm_core::format_status_message(info, &outcome.message);
            println!("{}", style.status(outcome.status, &message));
        }
    } else {
        let message = regm_core::format_status_message(info, &outcome.message);
        let header = match code_from_details(&outcome.details) {
            Some(code) => format!("{code}  {message}"),
            None => message,
        };
        match outcome.status {
            CommandStatus::Failure => println!("{}", style.error_header(&header)),
            _ => println!("{}", style.status(outcome.status, &header)),
        }
        if let Some(hint) = hint_from_details(&outcome.details) {
            println!("{}", style.info(&format!("Tip: {hint}")));
        }
    }

    Ok(code)
}

/// Listing rows: the active alias in the success style, the rest dimmed.
fn render_listing(style: &Style, details: &Value) -> Vec<String> {
    let Some(rows) = details.get("registries").and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(|row| {
            let line = row.get("line")?.as_str()?;
            let current = row.get("current").and_then(Value::as_bool).unwrap_or(false);
            Some(if current {
                style.success(line)
            } else {
                style.dim(line)
            })
        })
        .collect()
}

fn hint_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("hint"))
        .and_then(Value::as_str)
}

fn code_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("code"))
        .and_then(Value::as_str)
}
