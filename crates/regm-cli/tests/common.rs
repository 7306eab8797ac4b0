#![allow(dead_code)]

use std::{
    fs, panic,
    path::{Path, PathBuf},
    process::Output,
};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use httptest::Server;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway home: alias directory and `.npmrc` under one temp dir.
pub struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    pub fn new(prefix: &str) -> Self {
        let temp = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .expect("tempdir");
        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn alias_dir(&self) -> PathBuf {
        self.root().join("aliases")
    }

    pub fn npmrc(&self) -> PathBuf {
        self.root().join(".npmrc")
    }

    pub fn write_alias(&self, alias: &str, contents: &str) {
        fs::create_dir_all(self.alias_dir()).expect("alias dir");
        fs::write(self.alias_dir().join(alias), contents).expect("write alias");
    }

    pub fn write_npmrc(&self, contents: &str) {
        fs::write(self.npmrc(), contents).expect("write npmrc");
    }

    pub fn read_npmrc(&self) -> String {
        fs::read_to_string(self.npmrc()).unwrap_or_default()
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("regm");
        cmd.env("HOME", self.root())
            .env("REGM_HOME", self.alias_dir())
            .env("REGM_NPMRC", self.npmrc())
            .env("REGM_KEEP_PROXIES", "0")
            .env_remove("REGM_PROBE_TIMEOUT_MS")
            .env_remove("REGM_TIMINGS")
            .arg("--no-color");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("run regm")
    }
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn parse_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("json envelope")
}

pub fn server_or_skip(test: &str) -> Option<Server> {
    match panic::catch_unwind(Server::run) {
        Ok(server) => Some(server),
        Err(_) => {
            eprintln!("skipping {test} (httptest server unavailable)");
            None
        }
    }
}
