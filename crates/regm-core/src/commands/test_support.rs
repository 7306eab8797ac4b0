use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tempfile::TempDir;

use crate::core::config::context::CommandContext;
use crate::core::config::{Config, GlobalOptions, PathConfig, ProbeConfig};
use crate::core::npmrc::ActiveRegistry;
use crate::core::probe::{FetchResponse, RegistryProbe};
use crate::core::runtime::effects::{Effects, SharedEffects};

/// In-memory `.npmrc` that records every write.
#[derive(Default)]
pub(crate) struct MemoryActive {
    value: Mutex<String>,
    writes: Mutex<Vec<String>>,
    fail_writes: bool,
}

impl ActiveRegistry for MemoryActive {
    fn read(&self) -> Result<String> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn write(&self, uri: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("failed to replace .npmrc: permission denied"));
        }
        *self.value.lock().unwrap() = uri.to_string();
        self.writes.lock().unwrap().push(uri.to_string());
        Ok(())
    }
}

/// Answers from a uri table; unknown uris are unreachable.
#[derive(Default)]
pub(crate) struct TableProbe {
    answers: Mutex<HashMap<String, FetchResponse>>,
    calls: AtomicUsize,
}

impl RegistryProbe for TableProbe {
    fn fetch(&self, uri: &str) -> FetchResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .unwrap_or_else(|| FetchResponse::unreachable(Duration::from_millis(1)))
    }
}

#[derive(Default)]
pub(crate) struct FakeEffects {
    pub(crate) active: MemoryActive,
    pub(crate) probe: TableProbe,
}

impl Effects for FakeEffects {
    fn active(&self) -> &dyn ActiveRegistry {
        &self.active
    }

    fn probe(&self) -> &dyn RegistryProbe {
        &self.probe
    }
}

/// Temp alias directory plus fake collaborators for command tests.
pub(crate) struct TestEnv {
    temp: TempDir,
    global: GlobalOptions,
    effects: Arc<FakeEffects>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_effects(FakeEffects::default())
    }

    pub(crate) fn failing_writes() -> Self {
        Self::with_effects(FakeEffects {
            active: MemoryActive {
                fail_writes: true,
                ..MemoryActive::default()
            },
            ..FakeEffects::default()
        })
    }

    pub(crate) fn with_global(global: GlobalOptions) -> Self {
        Self {
            global,
            ..Self::new()
        }
    }

    fn with_effects(effects: FakeEffects) -> Self {
        Self {
            temp: tempfile::tempdir().unwrap(),
            global: GlobalOptions::default(),
            effects: Arc::new(effects),
        }
    }

    pub(crate) fn alias_dir(&self) -> PathBuf {
        self.temp.path().join("aliases")
    }

    fn npmrc(&self) -> PathBuf {
        self.temp.path().join(".npmrc")
    }

    pub(crate) fn ctx(&self) -> CommandContext<'_> {
        let config = Config::new(
            PathConfig {
                alias_dir: self.alias_dir(),
                npmrc: self.npmrc(),
            },
            ProbeConfig {
                timeout: Duration::from_secs(1),
                keep_proxies: false,
            },
        );
        let effects: SharedEffects = self.effects.clone();
        CommandContext::with_effects(&self.global, config, effects)
    }

    pub(crate) fn write_alias(&self, alias: &str, contents: &str) {
        let dir = self.alias_dir();
        fs::create_dir_all(&dir).unwrap();
        write_line(&dir.join(alias), contents);
    }

    pub(crate) fn set_active(&self, uri: &str) {
        *self.effects.active.value.lock().unwrap() = uri.to_string();
    }

    pub(crate) fn active_writes(&self) -> Vec<String> {
        self.effects.active.writes.lock().unwrap().clone()
    }

    pub(crate) fn answer(&self, uri: &str, response: FetchResponse) {
        self.effects
            .probe
            .answers
            .lock()
            .unwrap()
            .insert(uri.to_string(), response);
    }

    pub(crate) fn probe_calls(&self) -> usize {
        self.effects.probe.calls.load(Ordering::SeqCst)
    }
}

fn write_line(path: &Path, contents: &str) {
    let mut contents = contents.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents).unwrap();
}
