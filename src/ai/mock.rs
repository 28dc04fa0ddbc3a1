use super::CompletionService;
use crate::models::ChatCompletionRequest;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Replays canned response envelopes and records the requests it receives.
#[derive(Clone)]
pub struct MockCompletionClient {
    responses: Arc<Mutex<Vec<Value>>>,
    requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletionClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<Value> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.requests.lock().unwrap().push(request.clone());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default: a single tiny PNG as a data URL
            Ok(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "data:image/png;base64,iVBORw0KGgo="
                    }
                }]
            }))
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
