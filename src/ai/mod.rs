//! Transport to the image-generation endpoint
//!
//! [`CompletionService`] sends one chat-completion request and hands back the
//! raw JSON envelope. The HTTP implementation talks to the proxy; the mock
//! replays canned envelopes for tests.

pub mod client;
pub mod mock;

pub use client::CompletionClient;
pub use mock::MockCompletionClient;

use crate::models::ChatCompletionRequest;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Value>;
}
