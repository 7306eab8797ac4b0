//! The package manager's own config file, reduced to its `registry` entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::fs::write_atomic;

const REGISTRY_KEY: &str = "registry";

/// Reads and writes the registry the package manager currently uses.
pub trait ActiveRegistry: Send + Sync {
    /// Returns the configured registry uri, or an empty string when none is set.
    fn read(&self) -> Result<String>;
    fn write(&self, uri: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct NpmrcFile {
    path: PathBuf,
}

impl NpmrcFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ActiveRegistry for NpmrcFile {
    fn read(&self) -> Result<String> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(registry_value(&contents).unwrap_or_default().to_string())
    }

    fn write(&self, uri: &str) -> Result<()> {
        let existing = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };
        let updated = upsert_registry(&existing, uri);
        write_atomic(&self.path, updated.as_bytes())?;
        tracing::debug!(path = %self.path.display(), uri, "updated active registry");
        Ok(())
    }
}

fn registry_entry(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.starts_with('#') || line.starts_with(';') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    (key.trim() == REGISTRY_KEY).then(|| value.trim())
}

fn registry_value(contents: &str) -> Option<&str> {
    contents.lines().find_map(registry_entry)
}

/// Replaces the first `registry=` line, or appends one, keeping every other
/// line as it was.
fn upsert_registry(contents: &str, uri: &str) -> String {
    let mut out = String::with_capacity(contents.len() + uri.len() + 16);
    let mut replaced = false;
    for line in contents.lines() {
        if !replaced && registry_entry(line).is_some() {
            out.push_str(REGISTRY_KEY);
            out.push('=');
            out.push_str(uri);
            replaced = true;
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    if !replaced {
        out.push_str(REGISTRY_KEY);
        out.push('=');
        out.push_str(uri);
        out.push('\n');
    }
    out
}
