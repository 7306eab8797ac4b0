use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use regm_domain::{is_uri, validate_alias_name, RegistryError, PRESETS};

use super::scanner::{scan_user_aliases, UserAliases};
use crate::core::fs::write_atomic;
use crate::core::npmrc::ActiveRegistry;

/// Merges user aliases with the presets. User entries are copied first and
/// presets written over them, so a preset keeps its uri on a name collision.
pub fn merge_registries(user: &IndexMap<String, String>) -> HashMap<String, String> {
    let mut merged = HashMap::with_capacity(user.len() + PRESETS.len());
    for (alias, uri) in user {
        merged.insert(alias.clone(), uri.clone());
    }
    for preset in PRESETS {
        merged.insert(preset.alias.to_string(), preset.uri.to_string());
    }
    merged
}

/// Merged view of preset and user aliases for one command invocation.
///
/// Invariants: every entry of `keys` resolves in `registry`, and every preset
/// alias is listed in `keys`.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    base_dir: PathBuf,
    registry: HashMap<String, String>,
    keys: Vec<String>,
    preset_keys: HashSet<String>,
    user: UserAliases,
}

impl RegistryStore {
    /// Scans `base_dir` and merges what it finds with the presets.
    pub fn load(base_dir: &Path) -> Self {
        Self::from_user_aliases(base_dir, scan_user_aliases(base_dir))
    }

    pub fn from_user_aliases(base_dir: &Path, user: UserAliases) -> Self {
        let registry = merge_registries(&user.key);
        let preset_keys: HashSet<String> = PRESETS
            .iter()
            .map(|preset| preset.alias.to_string())
            .collect();
        let mut keys: Vec<String> = PRESETS
            .iter()
            .map(|preset| preset.alias.to_string())
            .collect();
        keys.extend(
            user.key
                .keys()
                .filter(|alias| !preset_keys.contains(alias.as_str()))
                .cloned(),
        );
        Self {
            base_dir: base_dir.to_path_buf(),
            registry,
            keys,
            preset_keys,
            user,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Aliases in display order: presets first, then user aliases.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn registry(&self) -> &HashMap<String, String> {
        &self.registry
    }

    pub fn preset_keys(&self) -> &HashSet<String> {
        &self.preset_keys
    }

    pub fn is_preset(&self, alias: &str) -> bool {
        self.preset_keys.contains(alias)
    }

    pub fn alias_path(&self, alias: &str) -> PathBuf {
        self.base_dir.join(alias)
    }

    pub fn resolve(&self, alias: &str) -> Result<&str, RegistryError> {
        self.registry
            .get(alias)
            .map(String::as_str)
            .ok_or_else(|| RegistryError::AliasNotFound {
                alias: alias.to_string(),
                source_dir: self.base_dir.display().to_string(),
            })
    }

    /// Alias currently bound to `uri`, preferring presets. A user alias that a
    /// preset shadows never matches.
    pub fn alias_for_uri(&self, uri: &str) -> Option<&str> {
        let uri = uri.trim();
        if uri.is_empty() {
            return None;
        }
        if let Some(preset) = PRESETS.iter().find(|preset| preset.uri == uri) {
            return Some(preset.alias);
        }
        let alias = self.user.source.get(uri)?;
        (self.registry.get(alias).map(String::as_str) == Some(uri)).then_some(alias.as_str())
    }

    /// Adds a user alias and persists it as `<base_dir>/<alias>`.
    ///
    /// At least one of `uri` and `homepage` must be a valid uri; the mapping
    /// always records `uri`. The homepage is stored on the second line, so
    /// `uri` must be non-blank and neither value may span lines.
    pub fn insert(
        &mut self,
        alias: &str,
        uri: &str,
        homepage: &str,
    ) -> Result<PathBuf, RegistryError> {
        if self.registry.contains_key(alias) {
            return Err(RegistryError::AliasAlreadyExists {
                alias: alias.to_string(),
            });
        }
        validate_alias_name(alias)?;
        let spans_lines = |value: &str| value.contains(['\r', '\n']);
        if uri.trim().is_empty()
            || spans_lines(uri)
            || spans_lines(homepage)
            || (!is_uri(uri) && !is_uri(homepage))
        {
            return Err(RegistryError::InvalidUri {
                uri: uri.to_string(),
                homepage: homepage.to_string(),
            });
        }

        let uri = uri.trim();
        let homepage = homepage.trim();
        let mut contents = format!("{uri}\n");
        if !homepage.is_empty() && homepage != uri {
            contents.push_str(homepage);
            contents.push('\n');
        }
        let path = self.alias_path(alias);
        write_atomic(&path, contents.as_bytes())
            .map_err(|err| RegistryError::io("add registry fail", &format!("{err:#}")))?;

        self.user.insert(alias.to_string(), uri.to_string());
        self.registry.insert(alias.to_string(), uri.to_string());
        self.keys.push(alias.to_string());
        tracing::debug!(alias, uri, path = %path.display(), "added user alias");
        Ok(path)
    }

    /// Removes a user alias and its backing file. Presets are never removable.
    pub fn drop_alias(&mut self, alias: &str) -> Result<PathBuf, RegistryError> {
        if self.is_preset(alias) {
            return Err(RegistryError::PresetProtected {
                alias: alias.to_string(),
            });
        }
        self.resolve(alias)?;

        let path = self.alias_path(alias);
        fs::remove_file(&path).map_err(|err| {
            RegistryError::io(
                "del registry fail",
                &format!("failed to remove {}: {err}", path.display()),
            )
        })?;

        self.user.remove(alias);
        self.registry.remove(alias);
        self.keys.retain(|key| key != alias);
        tracing::debug!(alias, path = %path.display(), "removed user alias");
        Ok(path)
    }

    /// Points the package manager at `alias`, returning the uri written.
    pub fn set_current(
        &self,
        alias: &str,
        active: &dyn ActiveRegistry,
    ) -> Result<&str, RegistryError> {
        let uri = self.resolve(alias)?;
        active
            .write(uri)
            .map_err(|err| RegistryError::io("use registry fail", &format!("{err:#}")))?;
        Ok(uri)
    }
}
