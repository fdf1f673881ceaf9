//! Brand voice data models and wire-shape normalization.

use serde::{Deserialize, Serialize};

/// Fallback media type when an image example carries no usable declaration.
const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// One calibration input, normalized from the wire shape.
///
/// Deliberately a sum type: the analyzer's prompt assembly matches it
/// exhaustively, so an example can never be silently skipped because its
/// shape is unexpected.
#[derive(Debug, Clone, PartialEq)]
pub enum BrandVoiceExample {
    Text {
        content: String,
    },
    Image {
        /// Base64 image bytes, data-URL prefix already stripped.
        data: String,
        media_type: String,
        caption: Option<String>,
    },
    Mixed {
        data: String,
        media_type: String,
        caption: String,
    },
}

impl BrandVoiceExample {
    /// An example is usable when it carries text, image data, or a caption.
    pub fn is_valid(&self) -> bool {
        match self {
            BrandVoiceExample::Text { content } => !content.trim().is_empty(),
            BrandVoiceExample::Image { data, caption, .. } => {
                !data.trim().is_empty()
                    || caption.as_deref().is_some_and(|c| !c.trim().is_empty())
            }
            BrandVoiceExample::Mixed { data, caption, .. } => {
                !data.trim().is_empty() || !caption.trim().is_empty()
            }
        }
    }

    /// Whether this example contributes an inline image to the prompt.
    pub fn has_image(&self) -> bool {
        match self {
            BrandVoiceExample::Text { .. } => false,
            BrandVoiceExample::Image { data, .. } | BrandVoiceExample::Mixed { data, .. } => {
                !data.trim().is_empty()
            }
        }
    }
}

/// The inferred (or caller-supplied) style descriptor. All four fields are
/// always populated: analysis failures substitute `default_profile()`
/// wholesale, never field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandVoiceProfile {
    pub tone: String,
    pub style: String,
    pub terminology: Vec<String>,
    pub structure: String,
}

impl BrandVoiceProfile {
    /// The profile used whenever analysis cannot produce a real one.
    pub fn default_profile() -> Self {
        BrandVoiceProfile {
            tone: "professional".to_string(),
            style: "clear and concise".to_string(),
            terminology: vec![],
            structure: "standard".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExampleKind {
    Text,
    Image,
    Mixed,
}

/// Structured example as submitted on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandVoiceExampleInput {
    pub kind: ExampleKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub auxiliary_text: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
}

/// The `brandVoiceExamples` field accepts either the legacy flat list of raw
/// strings or the structured list. Normalized at the orchestrator boundary —
/// no downstream component ever sees the legacy shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExampleListInput {
    Legacy(Vec<String>),
    Structured(Vec<BrandVoiceExampleInput>),
}

/// Normalizes both wire shapes into the internal sum type.
pub fn normalize_examples(input: ExampleListInput) -> Vec<BrandVoiceExample> {
    match input {
        ExampleListInput::Legacy(texts) => texts
            .into_iter()
            .map(|content| BrandVoiceExample::Text { content })
            .collect(),
        ExampleListInput::Structured(inputs) => inputs
            .into_iter()
            .map(|input| match input.kind {
                ExampleKind::Text => BrandVoiceExample::Text {
                    content: input.content,
                },
                ExampleKind::Image => {
                    let (data, media_type) =
                        split_data_url(&input.content, input.media_type.as_deref());
                    BrandVoiceExample::Image {
                        data,
                        media_type,
                        caption: input.auxiliary_text,
                    }
                }
                ExampleKind::Mixed => {
                    let (data, media_type) =
                        split_data_url(&input.content, input.media_type.as_deref());
                    BrandVoiceExample::Mixed {
                        data,
                        media_type,
                        caption: input.auxiliary_text.unwrap_or_default(),
                    }
                }
            })
            .collect(),
    }
}

/// Splits a possible data URL into (base64 payload, media type).
///
/// A `data:<mt>;base64,` prefix wins over the declared media type; plain
/// base64 falls through unchanged with the declared type, defaulting to
/// `image/png` when nothing usable is available.
fn split_data_url(content: &str, declared: Option<&str>) -> (String, String) {
    if let Some(rest) = content.strip_prefix("data:") {
        if let Some((meta, data)) = rest.split_once(',') {
            let embedded = meta.strip_suffix(";base64").unwrap_or(meta).trim();
            let media_type = if embedded.is_empty() {
                declared
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or(DEFAULT_MEDIA_TYPE)
            } else {
                embedded
            };
            return (data.to_string(), media_type.to_string());
        }
    }
    let media_type = declared
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_MEDIA_TYPE);
    (content.to_string(), media_type.to_string())
}
