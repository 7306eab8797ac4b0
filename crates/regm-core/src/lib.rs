mod commands;
mod core;

pub use crate::commands::probe::{probe_registries, ProbeRequest};
pub use crate::commands::registry::{
    add_registry, delete_registry, list_registries, show_current, use_registry, AddRequest,
    DeleteRequest, UseRequest,
};
pub use crate::core::config::context::{CommandContext, CommandInfo};
pub use crate::core::config::{Config, GlobalOptions, PathConfig, ProbeConfig};
pub use crate::core::npmrc::{ActiveRegistry, NpmrcFile};
pub use crate::core::probe::{
    classify, probe_aliases, plan_targets, FetchResponse, HttpProbe, ProbeReporter, ProbeResult,
    ProbeState, ProbeTarget, RegistryProbe, SilentReporter, PRINTER_WORKERS,
};
pub use crate::core::runtime::effects::{Effects, SharedEffects, SystemEffects};
pub use crate::core::runtime::{format_status_message, to_json_response, CommandGroup};
pub use crate::core::store::{
    list_alias_files, merge_registries, scan_user_aliases, AliasFile, RegistryStore, UserAliases,
};
pub use crate::core::tooling::outcome::{CommandStatus, ExecutionOutcome};

pub use regm_domain::{RegistryError, PRESETS};
