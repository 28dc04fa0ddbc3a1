//! Request payloads for the chat-completions style image endpoint.
//!
//! Responses are not modelled as structs: image data turns up in several
//! shapes, so the envelope stays a `serde_json::Value` and is walked by
//! [`crate::extract`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-image-preview-4k";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    /// Single-turn request carrying `prompt` as the only user message.
    pub fn for_prompt(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage::user(prompt)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest::for_prompt("model-x", "a red fox");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "model-x",
                "messages": [{ "role": "user", "content": "a red fox" }]
            })
        );
    }
}
