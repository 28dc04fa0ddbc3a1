//! Error handling and custom error types
//!
//! Every failure of a generation run maps to one variant, so callers can tell
//! a transport problem from a response that simply held no image.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", truncate(.body, DISPLAY_EXCERPT_LIMIT))]
    HttpStatus { status: u16, body: String },

    #[error("Response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No choices in response: {response}")]
    MissingChoices { response: String },

    #[error("No content in response message: {message}")]
    MissingContent { message: String },

    #[error("Invalid data URL format: {0}")]
    MalformedDataUrl(String),

    #[error("Response content is text, not image data ({} chars)", .text.chars().count())]
    NotImage { text: String },

    #[error("Failed to decode base64 image: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to write image to {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Longest response excerpt rendered by an error message or log line.
pub const DISPLAY_EXCERPT_LIMIT: usize = 500;

/// Cut `text` to at most `max` characters, appending `...` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
