//! Classifying and decoding image content strings
//!
//! Content is either a `data:image/...;base64,` URL, a bare base64 payload
//! recognisable by its leading magic bytes, or plain text.

use crate::error::truncate;
use crate::{Error, Result};
use base64::Engine as _;

const JPEG_MAGIC: &str = "/9j/";
const PNG_MAGIC: &str = "iVBOR";
const TEXT_EXCERPT_LIMIT: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }

    /// Infer the format from a data URL header such as `data:image/png;base64`.
    ///
    /// Unknown subtypes fall back to JPEG.
    fn from_data_url_header(header: &str) -> Self {
        let is_jpeg = header.contains("jpeg") || header.contains("jpg");
        if !is_jpeg && header.contains("png") {
            ImageKind::Png
        } else {
            ImageKind::Jpeg
        }
    }
}

/// Base64 image payload borrowed from a content string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePayload<'a> {
    pub data: &'a str,
    pub kind: ImageKind,
}

pub fn classify(content: &str) -> Result<ImagePayload<'_>> {
    if content.starts_with("data:image") {
        let (header, data) = content.split_once(',').ok_or_else(|| {
            Error::MalformedDataUrl(truncate(content, TEXT_EXCERPT_LIMIT))
        })?;
        return Ok(ImagePayload {
            data,
            kind: ImageKind::from_data_url_header(header),
        });
    }

    if content.starts_with(JPEG_MAGIC) {
        Ok(ImagePayload {
            data: content,
            kind: ImageKind::Jpeg,
        })
    } else if content.starts_with(PNG_MAGIC) {
        Ok(ImagePayload {
            data: content,
            kind: ImageKind::Png,
        })
    } else {
        Err(Error::NotImage {
            text: content.to_string(),
        })
    }
}

impl ImagePayload<'_> {
    /// Decode the payload with the standard base64 alphabet.
    ///
    /// Line breaks and other ASCII whitespace inside the payload are skipped.
    pub fn decode(&self) -> Result<Vec<u8>> {
        let bytes = if self.data.bytes().any(|b| b.is_ascii_whitespace()) {
            let compact: String = self
                .data
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            base64::engine::general_purpose::STANDARD.decode(compact)?
        } else {
            base64::engine::general_purpose::STANDARD.decode(self.data)?
        };

        check_format(&bytes, self.kind);
        Ok(bytes)
    }
}

/// Warn when the decoded bytes do not look like the format the content claimed.
fn check_format(bytes: &[u8], expected: ImageKind) {
    let detected = match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => Some(ImageKind::Jpeg),
        Ok(image::ImageFormat::Png) => Some(ImageKind::Png),
        Ok(other) => {
            tracing::warn!(
                "Decoded image looks like {:?}, saving as .{}",
                other,
                expected.extension()
            );
            return;
        }
        Err(_) => None,
    };

    match detected {
        Some(kind) if kind != expected => tracing::warn!(
            "Decoded image looks like .{} but content suggested .{}",
            kind.extension(),
            expected.extension()
        ),
        Some(_) => {}
        None => tracing::warn!(
            "Unrecognized image format (first 4 bytes: {:02X?})",
            &bytes[..bytes.len().min(4)]
        ),
    }
}

/// Excerpt of non-image content for display.
pub fn text_excerpt(text: &str) -> String {
    truncate(text, TEXT_EXCERPT_LIMIT)
}
