use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use indexmap::IndexMap;

use crate::core::tooling::timings::StageTimer;

/// One candidate alias file in the alias directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasFile {
    pub alias: String,
    pub path: PathBuf,
}

/// User aliases read from disk, indexed both ways.
#[derive(Debug, Clone, Default)]
pub struct UserAliases {
    /// uri -> alias; the first alias in scan order wins a shared uri.
    pub source: HashMap<String, String>,
    /// alias -> uri, in scan order.
    pub key: IndexMap<String, String>,
}

impl UserAliases {
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    pub fn insert(&mut self, alias: String, uri: String) {
        self.source.entry(uri.clone()).or_insert_with(|| alias.clone());
        self.key.insert(alias, uri);
    }

    pub fn remove(&mut self, alias: &str) -> Option<String> {
        let uri = self.key.shift_remove(alias)?;
        if self.source.get(&uri).is_some_and(|owner| owner == alias) {
            self.source.remove(&uri);
            if let Some((other, _)) = self.key.iter().find(|(_, other_uri)| **other_uri == uri) {
                self.source.insert(uri.clone(), other.clone());
            }
        }
        Some(uri)
    }
}

/// Lists the regular files in `base_dir`, sorted by name. A missing or
/// unreadable directory simply means there are no user aliases yet.
pub fn list_alias_files(base_dir: &Path) -> Vec<AliasFile> {
    let entries = match fs::read_dir(base_dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %base_dir.display(), %err, "alias directory unavailable");
            return Vec::new();
        }
    };
    let mut files = Vec::new();
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            continue;
        }
        let Some(alias) = entry.file_name().to_str().map(ToOwned::to_owned) else {
            continue;
        };
        if alias.starts_with('.') {
            continue;
        }
        files.push(AliasFile {
            alias,
            path: entry.path(),
        });
    }
    files.sort_by(|a, b| a.alias.cmp(&b.alias));
    files
}

fn read_first_line(path: &Path) -> io::Result<Option<String>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let uri = line.trim();
    Ok((!uri.is_empty()).then(|| uri.to_string()))
}

/// Reads every alias file under `base_dir` concurrently, one thread per file.
///
/// Files that cannot be read, or whose first line is blank, are skipped. The
/// result is only assembled once every reader has finished.
pub fn scan_user_aliases(base_dir: &Path) -> UserAliases {
    let mut timer = StageTimer::start("scan_user_aliases");
    let files = list_alias_files(base_dir);
    if files.is_empty() {
        return UserAliases::default();
    }

    let (tx, rx) = mpsc::channel::<(usize, String)>();
    let mut read = thread::scope(|scope| {
        for (index, file) in files.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || match read_first_line(&file.path) {
                Ok(Some(uri)) => {
                    let _ = tx.send((index, uri));
                }
                Ok(None) => {
                    tracing::warn!(alias = %file.alias, "alias file is empty; skipping");
                }
                Err(err) => {
                    tracing::warn!(
                        alias = %file.alias,
                        path = %file.path.display(),
                        %err,
                        "failed to read alias file; skipping"
                    );
                }
            });
        }
        drop(tx);
        rx.iter().collect::<Vec<_>>()
    });

    read.sort_by_key(|(index, _)| *index);
    let mut aliases = UserAliases::default();
    for (index, uri) in read {
        aliases.insert(files[index].alias.clone(), uri);
    }
    tracing::debug!(
        dir = %base_dir.display(),
        found = files.len(),
        loaded = aliases.key.len(),
        "scanned user aliases"
    );
    timer.items(aliases.key.len());
    aliases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn missing_directory_yields_no_aliases() {
        let temp = tempfile::tempdir().unwrap();
        let aliases = scan_user_aliases(&temp.path().join("absent"));
        assert!(aliases.is_empty());
        assert!(aliases.source.is_empty());
    }

    #[test]
    fn reads_only_the_first_line_of_each_file() {
        let temp = tempfile::tempdir().unwrap();
        write(
            temp.path(),
            "corp",
            "https://registry.corp.example/\nhttps://corp.example/home\n",
        );
        write(temp.path(), "local", "  http://localhost:4873  ");

        let aliases = scan_user_aliases(temp.path());
        assert_eq!(aliases.key["corp"], "https://registry.corp.example/");
        assert_eq!(aliases.key["local"], "http://localhost:4873");
        assert_eq!(aliases.source["http://localhost:4873"], "local");
    }

    #[test]
    fn key_and_source_are_inverse_maps_in_scan_order() {
        let temp = tempfile::tempdir().unwrap();
        for idx in (0..24).rev() {
            write(
                temp.path(),
                &format!("alias{idx:02}"),
                &format!("https://mirror{idx:02}.example/\n"),
            );
        }

        let aliases = scan_user_aliases(temp.path());
        let names: Vec<_> = aliases.key.keys().cloned().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted, "scan order follows file names");
        assert_eq!(aliases.key.len(), 24);
        for (alias, uri) in &aliases.key {
            assert_eq!(&aliases.source[uri], alias);
        }
    }

    #[test]
    fn skips_directories_hidden_and_blank_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        write(temp.path(), ".regm-partial", "https://half.example/\n");
        write(temp.path(), "blank", "\n\n");
        write(temp.path(), "good", "https://good.example/\n");

        let files = list_alias_files(temp.path());
        let names: Vec<_> = files.iter().map(|file| file.alias.as_str()).collect();
        assert_eq!(names, ["blank", "good"]);

        let aliases = scan_user_aliases(temp.path());
        assert_eq!(aliases.key.keys().collect::<Vec<_>>(), ["good"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_files_are_dropped_without_aborting() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "locked", "https://locked.example/\n");
        write(temp.path(), "open", "https://open.example/\n");
        let locked = temp.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if File::open(&locked).is_ok() {
            eprintln!("skipping unreadable alias test (running with elevated permissions)");
            return;
        }

        let aliases = scan_user_aliases(temp.path());
        assert!(!aliases.key.contains_key("locked"));
        assert_eq!(aliases.key["open"], "https://open.example/");
    }

    #[test]
    fn shared_uri_keeps_first_alias_as_source() {
        let mut aliases = UserAliases::default();
        aliases.insert("a".into(), "https://same.example/".into());
        aliases.insert("b".into(), "https://same.example/".into());
        assert_eq!(aliases.source["https://same.example/"], "a");

        aliases.remove("a");
        assert_eq!(aliases.source["https://same.example/"], "b");
        aliases.remove("b");
        assert!(aliases.source.is_empty());
    }
}
