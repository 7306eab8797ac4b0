use std::sync::Arc;

use anyhow::Result;

use crate::core::config::Config;
use crate::core::npmrc::{ActiveRegistry, NpmrcFile};
use crate::core::probe::{HttpProbe, RegistryProbe};

/// External collaborators the core talks to.
pub trait Effects: Send + Sync {
    fn active(&self) -> &dyn ActiveRegistry;
    fn probe(&self) -> &dyn RegistryProbe;
}

pub struct SystemEffects {
    active: Arc<NpmrcFile>,
    probe: Arc<HttpProbe>,
}

impl SystemEffects {
    /// Wires the `.npmrc` file and HTTP probe described by `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let probe = config.probe();
        Ok(Self {
            active: Arc::new(NpmrcFile::new(config.paths().npmrc.clone())),
            probe: Arc::new(HttpProbe::new(probe.timeout, probe.keep_proxies)?),
        })
    }
}

impl Effects for SystemEffects {
    fn active(&self) -> &dyn ActiveRegistry {
        self.active.as_ref()
    }

    fn probe(&self) -> &dyn RegistryProbe {
        self.probe.as_ref()
    }
}

pub type SharedEffects = Arc<dyn Effects>;
