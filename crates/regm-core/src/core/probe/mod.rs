//! Concurrent liveness/latency probes for registry endpoints.

mod dispatcher;
mod http;

use std::time::Duration;

use regm_domain::RegistryError;
use serde::{Deserialize, Serialize};

use crate::core::store::RegistryStore;

pub use dispatcher::{probe_aliases, PRINTER_WORKERS};
pub use http::HttpProbe;

/// What the network collaborator observed for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub elapsed: Duration,
    pub status_code: Option<u16>,
    /// Human status text: the numeric code, `timeout`, or `unreachable`.
    pub status: String,
    pub is_timeout: bool,
}

impl FetchResponse {
    #[must_use]
    pub fn status(elapsed: Duration, code: u16) -> Self {
        Self {
            elapsed,
            status_code: Some(code),
            status: code.to_string(),
            is_timeout: false,
        }
    }

    #[must_use]
    pub fn timeout(elapsed: Duration) -> Self {
        Self {
            elapsed,
            status_code: None,
            status: "timeout".to_string(),
            is_timeout: true,
        }
    }

    #[must_use]
    pub fn unreachable(elapsed: Duration) -> Self {
        Self {
            elapsed,
            status_code: None,
            status: "unreachable".to_string(),
            is_timeout: false,
        }
    }
}

/// Times a single request against a registry endpoint.
pub trait RegistryProbe: Send + Sync {
    fn fetch(&self, uri: &str) -> FetchResponse;
}

/// Receives each probe result once, on a printer thread.
pub trait ProbeReporter: Sync {
    fn report(&self, result: &ProbeResult);
}

/// Reporter for `--json` and `--quiet` runs.
pub struct SilentReporter;

impl ProbeReporter for SilentReporter {
    fn report(&self, _result: &ProbeResult) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeState {
    Success,
    TimedOut,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub alias: String,
    pub uri: String,
    pub state: ProbeState,
    /// Absent for timeouts, where the elapsed time means nothing.
    pub elapsed_secs: Option<f64>,
    pub status_code: Option<u16>,
    pub status: String,
    pub line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub alias: String,
    pub uri: String,
}

/// Picks the aliases to probe: the one named, or every known alias in
/// display order. An unknown alias fails before any request is made.
pub fn plan_targets(
    store: &RegistryStore,
    alias: Option<&str>,
) -> Result<Vec<ProbeTarget>, RegistryError> {
    match alias {
        Some(alias) => {
            let uri = store.resolve(alias)?;
            Ok(vec![ProbeTarget {
                alias: alias.to_string(),
                uri: uri.to_string(),
            }])
        }
        None => store
            .keys()
            .iter()
            .map(|alias| {
                store.resolve(alias).map(|uri| ProbeTarget {
                    alias: alias.clone(),
                    uri: uri.to_string(),
                })
            })
            .collect(),
    }
}

#[must_use]
pub fn classify(alias: &str, uri: &str, response: FetchResponse) -> ProbeResult {
    let state = if response.is_timeout {
        ProbeState::TimedOut
    } else if response.status_code == Some(200) {
        ProbeState::Success
    } else {
        ProbeState::Failed
    };
    let (elapsed_secs, line) = match state {
        ProbeState::TimedOut => (None, format!("fetch {alias} state: {}", response.status)),
        ProbeState::Success | ProbeState::Failed => {
            let secs = response.elapsed.as_secs_f64();
            (
                Some(secs),
                format!("fetch {alias} {secs:.2}s state: {}", response.status),
            )
        }
    };
    ProbeResult {
        alias: alias.to_string(),
        uri: uri.to_string(),
        state,
        elapsed_secs,
        status_code: response.status_code,
        status: response.status,
        line,
    }
}
