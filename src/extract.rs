//! Locating image content inside a chat-completion choice
//!
//! Providers behind the proxy put image data in different places. Each
//! location is one extractor; [`EXTRACTORS`] lists them in precedence order
//! and [`find_content`] returns the first non-empty hit.

use serde_json::Value;

/// Pulls a candidate content string out of `choices[0]`.
pub type Extractor = fn(&Value) -> Option<String>;

/// Extractors in precedence order, paired with a label for logging.
pub const EXTRACTORS: &[(&str, Extractor)] = &[
    ("message.content", message_content),
    ("delta.content", delta_content),
    ("message.images", message_images),
    ("message.parts", message_parts),
];

/// Content located in a choice, with the extractor that found it.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub source: &'static str,
    pub content: String,
}

pub fn find_content(choice: &Value) -> Option<Located> {
    EXTRACTORS.iter().find_map(|&(source, extract)| {
        extract(choice).map(|content| Located { source, content })
    })
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn message_content(choice: &Value) -> Option<String> {
    non_empty(choice.get("message").and_then(|m| m.get("content")))
}

pub fn delta_content(choice: &Value) -> Option<String> {
    non_empty(choice.get("delta").and_then(|d| d.get("content")))
}

/// First entry of `message.images`, either a bare string or an object.
pub fn message_images(choice: &Value) -> Option<String> {
    let image = choice
        .get("message")?
        .get("images")?
        .as_array()?
        .first()?;

    match image {
        Value::String(s) => Some(s.clone()).filter(|s| !s.is_empty()),
        Value::Object(fields) => {
            tracing::debug!(
                "Found image object with keys: {:?}",
                fields.keys().collect::<Vec<_>>()
            );
            let image_url = fields.get("image_url").and_then(|url| match url {
                Value::Object(_) => non_empty(url.get("url")),
                other => non_empty(Some(other)),
            });
            image_url
                .or_else(|| non_empty(fields.get("data")))
                .or_else(|| non_empty(fields.get("b64_json")))
                .or_else(|| non_empty(fields.get("url")))
        }
        _ => None,
    }
}

/// Gemini-style `message.parts`: the first part carrying inline data wins.
pub fn message_parts(choice: &Value) -> Option<String> {
    let inline = choice
        .get("message")?
        .get("parts")?
        .as_array()?
        .iter()
        .find_map(|part| part.get("inline_data").or_else(|| part.get("inlineData")))?;

    non_empty(inline.get("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_message_content_first() {
        let choice = json!({
            "message": {
                "content": "iVBORfromcontent",
                "images": ["iVBORfromimages"]
            }
        });

        let located = find_content(&choice).unwrap();
        assert_eq!(located.source, "message.content");
        assert_eq!(located.content, "iVBORfromcontent");
    }

    #[test]
    fn test_empty_message_content_falls_through_to_delta() {
        let choice = json!({
            "message": { "content": "" },
            "delta": { "content": "/9j/delta" }
        });

        let located = find_content(&choice).unwrap();
        assert_eq!(located.source, "delta.content");
        assert_eq!(located.content, "/9j/delta");
    }

    #[test]
    fn test_null_content_falls_through_to_images() {
        let choice = json!({
            "message": {
                "content": null,
                "images": [{ "image_url": { "url": "data:image/png;base64,AAAA" } }]
            }
        });

        let located = find_content(&choice).unwrap();
        assert_eq!(located.source, "message.images");
        assert_eq!(located.content, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_images_image_url_as_string() {
        let choice = json!({ "message": { "images": [{ "image_url": "iVBORdirect" }] } });
        assert_eq!(message_images(&choice).as_deref(), Some("iVBORdirect"));
    }

    #[test]
    fn test_images_field_priority() {
        let choice = json!({
            "message": { "images": [{ "url": "u", "b64_json": "b", "data": "d" }] }
        });
        assert_eq!(message_images(&choice).as_deref(), Some("d"));

        let choice = json!({ "message": { "images": [{ "url": "u", "b64_json": "b" }] } });
        assert_eq!(message_images(&choice).as_deref(), Some("b"));

        let choice = json!({ "message": { "images": [{ "url": "u" }] } });
        assert_eq!(message_images(&choice).as_deref(), Some("u"));
    }

    #[test]
    fn test_images_bare_string_and_first_only() {
        let choice = json!({ "message": { "images": ["/9j/first", "iVBORsecond"] } });
        assert_eq!(message_images(&choice).as_deref(), Some("/9j/first"));
    }

    #[test]
    fn test_images_empty_array() {
        let choice = json!({ "message": { "images": [] } });
        assert_eq!(message_images(&choice), None);
    }

    #[test]
    fn test_parts_first_inline_data_wins() {
        let choice = json!({
            "message": {
                "parts": [
                    { "text": "here you go" },
                    { "inline_data": { "mime_type": "image/jpeg", "data": "/9j/one" } },
                    { "inline_data": { "mime_type": "image/png", "data": "iVBORtwo" } }
                ]
            }
        });

        let located = find_content(&choice).unwrap();
        assert_eq!(located.source, "message.parts");
        assert_eq!(located.content, "/9j/one");
    }

    #[test]
    fn test_parts_accepts_camel_case() {
        let choice = json!({
            "message": { "parts": [{ "inlineData": { "mimeType": "image/png", "data": "iVBORx" } }] }
        });
        assert_eq!(message_parts(&choice).as_deref(), Some("iVBORx"));
    }

    #[test]
    fn test_images_checked_before_parts() {
        let choice = json!({
            "message": {
                "images": ["iVBORimage"],
                "parts": [{ "inline_data": { "data": "/9j/part" } }]
            }
        });

        assert_eq!(find_content(&choice).unwrap().source, "message.images");
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(find_content(&json!({})), None);
        assert_eq!(find_content(&json!({ "message": { "role": "assistant" } })), None);
        assert_eq!(find_content(&json!({ "message": { "content": 42 } })), None);
    }
}
