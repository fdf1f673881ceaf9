/// LLM Client — the single point of entry for all model calls in BrandVoice.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All model interactions MUST go through the `ModelGateway` trait.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in BrandVoice.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One block of a multimodal prompt. Image data is base64-encoded,
/// already stripped of any data-URL prefix.
#[derive(Debug, Clone)]
pub enum PromptBlock {
    Text(String),
    Image { data: String, media_type: String },
}

impl PromptBlock {
    pub fn text(s: impl Into<String>) -> Self {
        PromptBlock::Text(s.into())
    }
}

/// The opaque model capability: submit a prompt (text plus optional inline
/// images), receive generated text. Carried in `AppState` as
/// `Arc<dyn ModelGateway>` so tests can substitute a mock.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn invoke(&self, blocks: &[PromptBlock], system: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic Messages API wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentPart<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct LlmResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Production gateway
// ────────────────────────────────────────────────────────────────────────────

/// The production `ModelGateway` backed by the Anthropic Messages API.
/// No retry logic: a failed call is surfaced once, immediately — the caller
/// decides how to degrade.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl ModelGateway for AnthropicClient {
    async fn invoke(&self, blocks: &[PromptBlock], system: &str) -> Result<String, LlmError> {
        let content: Vec<ContentPart> = blocks
            .iter()
            .map(|b| match b {
                PromptBlock::Text(text) => ContentPart::Text { text },
                PromptBlock::Image { data, media_type } => ContentPart::Image {
                    source: ImageSource {
                        source_type: "base64",
                        media_type,
                        data,
                    },
                },
            })
            .collect();

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await.map_err(LlmError::Http)?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(|t| t.to_string())
            .ok_or(LlmError::EmptyContent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient JSON extraction
// ────────────────────────────────────────────────────────────────────────────

/// Extracts a JSON object from free-form model output.
///
/// The model reply is not guaranteed to be pure JSON — it may wrap the object
/// in prose or code fences. Extraction order:
/// 1. A ```json ... ``` or ``` ... ``` fenced block, if present.
/// 2. Otherwise the first `{` through the last `}` found anywhere in the text.
/// 3. Otherwise `None`.
pub fn extract_json(text: &str) -> Option<&str> {
    let text = text.trim();

    if let Some(fence_start) = text.find("```") {
        let after = &text[fence_start + 3..];
        // Skip a language tag like "json" on the fence line
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let body = &after[body_start..];
        if let Some(fence_end) = body.find("```") {
            let inner = body[..fence_end].trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_extract_json_with_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_extract_json_embedded_in_prose() {
        let input = "Here is the analysis you asked for: {\"tone\": \"bold\"} — hope it helps!";
        assert_eq!(extract_json(input), Some("{\"tone\": \"bold\"}"));
    }

    #[test]
    fn test_extract_json_plain_object() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(extract_json(input), Some("{\"key\": \"value\"}"));
    }

    #[test]
    fn test_extract_json_nested_object() {
        let input = "Result: {\"outer\": {\"inner\": 1}} done";
        assert_eq!(extract_json(input), Some("{\"outer\": {\"inner\": 1}}"));
    }

    #[test]
    fn test_extract_json_no_json_returns_none() {
        assert_eq!(extract_json("I cannot help with that."), None);
    }

    #[test]
    fn test_extract_json_unclosed_brace_returns_none() {
        assert_eq!(extract_json("oops {\"key\": "), None);
    }
}
