use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Prefix for in-flight temp files; the alias scanner ignores dot-files.
const TEMP_PREFIX: &str = ".regm-";

/// Follows a symlinked `path` (a dotfiles-managed `~/.npmrc`, say) to the file
/// it points at, so the rename replaces the target and keeps the link.
fn resolve_link(path: &Path) -> Result<PathBuf> {
    let is_link = fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink());
    if !is_link {
        return Ok(path.to_path_buf());
    }
    if let Ok(target) = fs::canonicalize(path) {
        return Ok(target);
    }
    // Dangling link: create the file it names.
    let link = fs::read_link(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(match path.parent() {
        Some(parent) => parent.join(link),
        None => link,
    })
}

/// Writes `contents` to `path` through a sibling temp file and a rename, so a
/// reader never observes a half-written file.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let path = resolve_link(path)?;
    let path = path.as_path();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(parent)
        .with_context(|| format!("failed to create temp file under {}", parent.display()))?;
    tmp.write_all(contents)
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to sync {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}
