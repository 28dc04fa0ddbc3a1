//! Client configuration
//!
//! Endpoint, credentials and timeout are passed explicitly into the client so
//! tests can point it at a mock server.

use crate::{Error, Result};
use reqwest::Url;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8317/v1/chat/completions";
pub const DEFAULT_API_KEY: &str = "test-key-123";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(endpoint: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "Unsupported endpoint scheme '{}'",
                endpoint.scheme()
            )));
        }

        if timeout.is_zero() {
            return Err(Error::Config("Timeout must be greater than zero".to_string()));
        }

        Ok(Self {
            endpoint,
            api_key,
            timeout,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            api_key: DEFAULT_API_KEY.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
