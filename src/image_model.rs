//! Image model identifiers
//!
//! The proxy encodes aspect ratio and resolution as model id suffixes, e.g.
//! `gemini-3-pro-image-preview-4k-16x9`.

const ASPECT_RATIOS: &[(&[&str], &str)] = &[
    (&["-21x9", "-21-9"], "21:9"),
    (&["-16x9", "-16-9"], "16:9"),
    (&["-9x16", "-9-16"], "9:16"),
    (&["-4x3", "-4-3"], "4:3"),
    (&["-3x4", "-3-4"], "3:4"),
    (&["-1x1", "-1-1"], "1:1"),
];

const SUFFIXES: &[&str] = &[
    "-4k", "-2k", "-hd", "-21x9", "-21-9", "-16x9", "-16-9", "-9x16", "-9-16", "-4x3", "-4-3",
    "-3x4", "-3-4", "-1x1", "-1-1",
];

const IMAGE_MODEL_PATTERNS: &[&str] = &[
    "-image-preview",
    "-image-generation",
    "-pro-image",
    "imagen-",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageModelSpec {
    pub base_model: String,
    pub aspect_ratio: Option<&'static str>,
    pub image_size: Option<&'static str>,
}

impl ImageModelSpec {
    pub fn parse(model: &str) -> Self {
        let aspect_ratio = ASPECT_RATIOS
            .iter()
            .find(|(suffixes, _)| suffixes.iter().any(|s| model.contains(s)))
            .map(|&(_, ratio)| ratio);

        let image_size = if model.contains("-4k") || model.contains("-hd") {
            Some("4K")
        } else if model.contains("-2k") {
            Some("2K")
        } else {
            None
        };

        let base_model = SUFFIXES
            .iter()
            .fold(model.to_string(), |acc, suffix| acc.replace(suffix, ""));

        Self {
            base_model,
            aspect_ratio,
            image_size,
        }
    }
}

/// Whether `model` names an image generation model.
pub fn is_image_generation_model(model: &str) -> bool {
    let model = model.to_lowercase();
    IMAGE_MODEL_PATTERNS.iter().any(|p| model.contains(p))
}
