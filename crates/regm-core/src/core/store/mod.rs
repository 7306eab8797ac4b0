//! The registry alias store: user alias files merged with the presets.

mod registry;
mod scanner;

pub use registry::{merge_registries, RegistryStore};
pub use scanner::{list_alias_files, scan_user_aliases, AliasFile, UserAliases};
