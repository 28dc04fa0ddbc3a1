//! Client for image-generation models served behind a chat-completions proxy
//!
//! Sends a prompt, finds the image data in whichever shape the provider
//! returned it, decodes the base64 payload and writes it to disk.

pub mod ai;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod image_model;
pub mod models;
pub mod output;
pub mod payload;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use generator::{ImageRequestClient, SavedImage};
