use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::core::net;

pub(crate) const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5_000);
const ALIAS_DIR_NAME: &str = ".regm";
const NPMRC_NAME: &str = ".npmrc";

/// Output flags that change what a command does, not just how it renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub(crate) fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Non-empty value for `key`, ignoring surrounding whitespace.
    pub(crate) fn non_empty(&self, key: &str) -> Option<&str> {
        self.var(key).map(str::trim).filter(|value| !value.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) paths: PathConfig,
    pub(crate) probe: ProbeConfig,
}

impl Config {
    /// Builds a configuration snapshot from the current process environment.
    ///
    /// # Errors
    /// Returns an error if neither an override nor a home directory is available.
    pub fn from_env() -> Result<Self> {
        let snapshot = EnvSnapshot::capture();
        Self::from_snapshot(&snapshot, dirs_next::home_dir().as_deref())
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot, home: Option<&Path>) -> Result<Self> {
        let alias_dir = match snapshot.non_empty("REGM_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => home_relative(home, ALIAS_DIR_NAME, "REGM_HOME")?,
        };
        let npmrc = match snapshot.non_empty("REGM_NPMRC") {
            Some(path) => PathBuf::from(path),
            None => home_relative(home, NPMRC_NAME, "REGM_NPMRC")?,
        };
        let timeout = snapshot
            .non_empty("REGM_PROBE_TIMEOUT_MS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|millis| *millis > 0)
            .map_or(DEFAULT_PROBE_TIMEOUT, Duration::from_millis);
        Ok(Self {
            paths: PathConfig { alias_dir, npmrc },
            probe: ProbeConfig {
                timeout,
                keep_proxies: net::keep_proxies(snapshot),
            },
        })
    }

    #[must_use]
    pub fn new(paths: PathConfig, probe: ProbeConfig) -> Self {
        Self { paths, probe }
    }

    #[must_use]
    pub fn paths(&self) -> &PathConfig {
        &self.paths
    }

    #[must_use]
    pub fn probe(&self) -> &ProbeConfig {
        &self.probe
    }
}

fn home_relative(home: Option<&Path>, name: &str, override_key: &str) -> Result<PathBuf> {
    home.map(|home| home.join(name)).ok_or_else(|| {
        anyhow!("unable to determine the home directory; set {override_key} explicitly")
    })
}

#[derive(Debug, Clone)]
pub struct PathConfig {
    /// Directory holding one file per user alias.
    pub alias_dir: PathBuf,
    /// Package-manager config carrying the active `registry` entry.
    pub npmrc: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct ProbeConfig {
    pub timeout: Duration,
    pub keep_proxies: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            keep_proxies: false,
        }
    }
}
