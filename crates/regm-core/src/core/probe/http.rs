use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use super::{FetchResponse, RegistryProbe};

const USER_AGENT: &str = concat!("regm/", env!("CARGO_PKG_VERSION"));

/// Probes registries with a plain GET, bounded by the client timeout.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Builds the probe client.
    ///
    /// # Errors
    /// Returns an error if the TLS backend or proxy settings cannot be
    /// initialized.
    pub fn new(timeout: Duration, keep_proxies: bool) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT).timeout(timeout);
        if !keep_proxies {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("failed to build http client")?;
        Ok(Self { client })
    }
}

impl RegistryProbe for HttpProbe {
    fn fetch(&self, uri: &str) -> FetchResponse {
        let started = Instant::now();
        match self.client.get(uri).send() {
            Ok(response) => FetchResponse::status(started.elapsed(), response.status().as_u16()),
            Err(err) if err.is_timeout() => {
                tracing::debug!(uri, "probe timed out");
                FetchResponse::timeout(started.elapsed())
            }
            Err(err) => {
                tracing::debug!(uri, %err, "probe request failed");
                FetchResponse::unreachable(started.elapsed())
            }
        }
    }
}
