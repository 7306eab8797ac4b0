use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use super::{pick_arg, rejected};
use crate::core::config::context::CommandContext;
use crate::core::store::RegistryStore;
use crate::core::tooling::outcome::ExecutionOutcome;

#[derive(Clone, Debug, Default)]
pub struct UseRequest {
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AddRequest {
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DeleteRequest {
    pub args: Vec<String>,
}

/// One row of `regm ls`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub(crate) struct SourceRow {
    pub(crate) alias: String,
    pub(crate) uri: String,
    pub(crate) current: bool,
    pub(crate) preset: bool,
    pub(crate) line: String,
}

/// The active registry uri, trimmed; `None` when unset or unreadable.
fn read_active(ctx: &CommandContext) -> Option<String> {
    match ctx.active().read() {
        Ok(uri) => {
            let uri = uri.trim();
            (!uri.is_empty()).then(|| uri.to_string())
        }
        Err(err) => {
            tracing::debug!(error = %format!("{err:#}"), "no active registry");
            None
        }
    }
}

/// Renders every alias so the uri column lines up, marking the one whose uri
/// equals `active`.
pub(crate) fn source_rows(store: &RegistryStore, active: Option<&str>) -> Vec<SourceRow> {
    let width = store
        .keys()
        .iter()
        .map(|key| key.chars().count())
        .max()
        .unwrap_or(0)
        + 3;
    store
        .keys()
        .iter()
        .filter_map(|alias| {
            let uri = store.registry().get(alias)?;
            let current = active.is_some_and(|active| active == uri);
            let marker = if current { "* " } else { "  " };
            let dashes = "-".repeat(width.saturating_sub(alias.chars().count()).max(2));
            Some(SourceRow {
                alias: alias.clone(),
                uri: uri.clone(),
                current,
                preset: store.is_preset(alias),
                line: format!("{marker}{alias} {dashes} {uri}"),
            })
        })
        .collect()
}

pub fn list_registries(ctx: &CommandContext) -> Result<ExecutionOutcome> {
    let store = ctx.load_store();
    let active = read_active(ctx);
    let rows = source_rows(&store, active.as_deref());
    Ok(ExecutionOutcome::success(
        format!("{} registries", rows.len()),
        json!({
            "registries": rows,
            "current": active,
            "alias_dir": store.base_dir().display().to_string(),
        }),
    ))
}

pub fn show_current(ctx: &CommandContext) -> Result<ExecutionOutcome> {
    let npmrc = ctx.config().paths().npmrc.display().to_string();
    let Some(uri) = read_active(ctx) else {
        return Ok(ExecutionOutcome::user_error(
            "no active registry configured",
            json!({
                "reason": "no_active_registry",
                "npmrc": npmrc,
                "hint": "run `regm use <alias>` to pick one",
            }),
        ));
    };
    let store = ctx.load_store();
    let alias = store.alias_for_uri(&uri).map(ToOwned::to_owned);
    let message = match &alias {
        Some(alias) => format!("you are using {alias} ({uri})"),
        None => format!("you are using {uri}"),
    };
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "uri": uri,
            "alias": alias,
            "npmrc": npmrc,
        }),
    ))
}

pub fn use_registry(ctx: &CommandContext, request: &UseRequest) -> Result<ExecutionOutcome> {
    let alias = match pick_arg(&request.args, 0, "an alias") {
        Ok(alias) => alias,
        Err(err) => return Ok(rejected(&err)),
    };
    let store = ctx.load_store();
    match store.set_current(alias, ctx.active()) {
        Ok(uri) => Ok(ExecutionOutcome::success(
            format!("use {alias} success"),
            json!({ "alias": alias, "uri": uri }),
        )),
        Err(err) => Ok(rejected(&err)),
    }
}

pub fn add_registry(ctx: &CommandContext, request: &AddRequest) -> Result<ExecutionOutcome> {
    let (alias, uri) = match (
        pick_arg(&request.args, 0, "an alias"),
        pick_arg(&request.args, 1, "a registry uri"),
    ) {
        (Ok(alias), Ok(uri)) => (alias, uri),
        (Err(err), _) | (_, Err(err)) => return Ok(rejected(&err)),
    };
    let homepage = request.args.get(2).map_or(uri, String::as_str);

    let mut store = ctx.load_store();
    match store.insert(alias, uri, homepage) {
        Ok(path) => Ok(ExecutionOutcome::success(
            format!("add registry {alias} success"),
            json!({
                "alias": alias,
                "uri": uri.trim(),
                "homepage": homepage.trim(),
                "path": path.display().to_string(),
            }),
        )),
        Err(err) => Ok(rejected(&err)),
    }
}

pub fn delete_registry(ctx: &CommandContext, request: &DeleteRequest) -> Result<ExecutionOutcome> {
    let alias = match pick_arg(&request.args, 0, "an alias") {
        Ok(alias) => alias,
        Err(err) => return Ok(rejected(&err)),
    };
    let mut store = ctx.load_store();
    match store.drop_alias(alias) {
        Ok(path) => Ok(ExecutionOutcome::success(
            format!("del registry {alias} success"),
            json!({ "alias": alias, "path": path.display().to_string() }),
        )),
        Err(err) => Ok(rejected(&err)),
    }
}
