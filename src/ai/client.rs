use super::CompletionService;
use crate::config::ClientConfig;
use crate::error::{truncate, DISPLAY_EXCERPT_LIMIT};
use crate::models::ChatCompletionRequest;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

const LOG_BODY_LIMIT: usize = 1000;

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
pub struct CompletionClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl CompletionClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::new_with_client(config, client))
    }

    pub fn new_with_client(config: &ClientConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl CompletionService for CompletionClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Value> {
        tracing::debug!("Sending chat completion request to {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", self.endpoint, e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!(
                "API error (status {}): {}",
                status,
                truncate(&error_text, DISPLAY_EXCERPT_LIMIT)
            );
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse response: {}\nBody: {}",
                e,
                truncate(&body, LOG_BODY_LIMIT)
            );
            Error::Json(e)
        })
    }
}
