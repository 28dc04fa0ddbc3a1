//! One-shot image generation: request, locate content, decode, save.

use crate::ai::{CompletionClient, CompletionService};
use crate::config::ClientConfig;
use crate::error::truncate;
use crate::extract;
use crate::image_model::{is_image_generation_model, ImageModelSpec};
use crate::models::{ChatCompletionRequest, DEFAULT_MODEL};
use crate::output;
use crate::payload::{self, ImageKind};
use crate::{Error, Result};
use chrono::Local;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const RESPONSE_EXCERPT_LIMIT: usize = 1000;
const MESSAGE_EXCERPT_LIMIT: usize = 500;

/// A saved image and the format it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub kind: ImageKind,
    pub size: usize,
}

pub struct ImageRequestClient {
    service: Box<dyn CompletionService>,
    output_dir: Option<PathBuf>,
}

impl ImageRequestClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_service(Box::new(CompletionClient::new(config)?)))
    }

    /// Build a client around any completion backend, e.g. a mock in tests.
    pub fn with_service(service: Box<dyn CompletionService>) -> Self {
        Self {
            service,
            output_dir: None,
        }
    }

    /// Directory for generated file names; the working directory by default.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Generate an image for `prompt` and write it to `output_file`.
    ///
    /// `model` defaults to [`DEFAULT_MODEL`]. Without an output file the image
    /// is saved as `generated_image_<timestamp>.<ext>` in the output
    /// directory. No file is written on any error.
    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
        output_file: Option<&Path>,
    ) -> Result<SavedImage> {
        if prompt.trim().is_empty() {
            return Err(Error::InvalidInput("Prompt must not be empty".to_string()));
        }

        let model = model.unwrap_or(DEFAULT_MODEL);
        log_model(model);
        info!("Generating image with model: {}", model);
        info!("Prompt: {}", prompt);

        let request = ChatCompletionRequest::for_prompt(model, prompt);
        let envelope = self.service.complete(&request).await?;

        let content = locate_content(&envelope)?;
        let image = payload::classify(&content).inspect_err(|e| {
            if let Error::NotImage { text } = e {
                info!("Response content (text):\n{}", payload::text_excerpt(text));
            }
        })?;
        info!("Content looks like a .{} image", image.kind.extension());

        let bytes = image.decode()?;

        let path = match output_file {
            Some(path) => path.to_path_buf(),
            None => {
                let name = output::default_file_name(image.kind, Local::now());
                match &self.output_dir {
                    Some(dir) => dir.join(name),
                    None => name,
                }
            }
        };
        output::write_image(&path, &bytes)?;

        info!("Image saved to: {}", path.display());
        Ok(SavedImage {
            path,
            kind: image.kind,
            size: bytes.len(),
        })
    }
}

fn log_model(model: &str) {
    let spec = ImageModelSpec::parse(model);
    debug!(
        "Model {} -> base {}, aspect ratio {}, size {}",
        model,
        spec.base_model,
        spec.aspect_ratio.unwrap_or("default"),
        spec.image_size.unwrap_or("default")
    );
    if !is_image_generation_model(model) {
        warn!("Model {} does not look like an image generation model", model);
    }
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .map(|map| map.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn pretty_excerpt(value: &Value, limit: usize) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    truncate(&pretty, limit)
}

/// Walk the envelope down to a non-empty content string in `choices[0]`.
fn locate_content(envelope: &Value) -> Result<String> {
    info!("Response keys: {:?}", keys(envelope));

    let choice = envelope
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| {
            let response = pretty_excerpt(envelope, RESPONSE_EXCERPT_LIMIT);
            warn!("No choices in response:\n{}", response);
            Error::MissingChoices { response }
        })?;
    info!("Choice keys: {:?}", keys(choice));

    if let Some(message) = choice.get("message") {
        info!("Message keys: {:?}", keys(message));
    }

    match extract::find_content(choice) {
        Some(located) => {
            debug!("Content found in {}", located.source);
            Ok(located.content)
        }
        None => {
            let message = choice
                .get("message")
                .map(|m| pretty_excerpt(m, MESSAGE_EXCERPT_LIMIT))
                .unwrap_or_else(|| "{}".to_string());
            warn!("No content in response message:\n{}", message);
            Err(Error::MissingContent { message })
        }
    }
}
