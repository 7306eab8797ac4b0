use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::core::config::{Config, GlobalOptions};
use crate::core::npmrc::ActiveRegistry;
use crate::core::probe::RegistryProbe;
use crate::core::runtime::effects::{SharedEffects, SystemEffects};
use crate::core::runtime::CommandGroup;
use crate::core::store::RegistryStore;

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

pub struct CommandContext<'a> {
    pub global: &'a GlobalOptions,
    config: Config,
    effects: SharedEffects,
}

impl<'a> CommandContext<'a> {
    /// Creates a command context from the process environment with the
    /// system collaborators (`.npmrc` file, HTTP probe).
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be resolved or the HTTP
    /// client cannot be built.
    pub fn new(global: &'a GlobalOptions) -> Result<Self> {
        let config = Config::from_env()?;
        let effects: SharedEffects = Arc::new(SystemEffects::from_config(&config)?);
        Ok(Self::with_effects(global, config, effects))
    }

    #[must_use]
    pub fn with_effects(global: &'a GlobalOptions, config: Config, effects: SharedEffects) -> Self {
        Self {
            global,
            config,
            effects,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn alias_dir(&self) -> &Path {
        &self.config.paths().alias_dir
    }

    pub fn active(&self) -> &dyn ActiveRegistry {
        self.effects.active()
    }

    pub fn probe(&self) -> &dyn RegistryProbe {
        self.effects.probe()
    }

    /// Per-result progress lines would corrupt `--json` output and break
    /// `--quiet`.
    pub fn streams_progress(&self) -> bool {
        !(self.global.json || self.global.quiet)
    }

    /// Scans the alias directory and merges it with the presets. Every
    /// command starts from a fresh store.
    pub fn load_store(&self) -> RegistryStore {
        RegistryStore::load(self.alias_dir())
    }
}
