use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::source::Source;

/// HTTP backend for the back-office API.
///
/// Holds one shared [`reqwest::Client`] configured with the request timeout;
/// a timed-out request surfaces as [`Error::Timeout`] and takes the same
/// degraded path as any other transport failure.
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("teller/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api.base_url, config.timeout())
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self, path: &str, query: &[(&'static str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout(self.timeout)
            } else {
                Error::Malformed(format!("invalid JSON body: {e}"))
            }
        })
    }

    async fn ping(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Status {
                status: response.status().as_u16(),
            })
        }
    }
}
