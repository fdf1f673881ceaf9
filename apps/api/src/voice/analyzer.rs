//! Brand Voice Analyzer — infers a style profile from example content.
//!
//! Never fails outward: empty input, a gateway error, or an unparsable reply
//! all yield the default profile. All failure handling for calibration lives
//! here so the orchestrator always receives a well-formed profile.

use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json, ModelGateway, PromptBlock};
use crate::voice::models::{BrandVoiceExample, BrandVoiceProfile};
use crate::voice::prompts::{
    ANALYSIS_INTRO, ANALYSIS_OUTPUT_FORMAT, ANALYSIS_VISUAL_ADDENDUM, IMAGE_EXAMPLE_LABEL,
    MIXED_EXAMPLE_LABEL,
};

/// Infers a `BrandVoiceProfile` from the given examples.
///
/// Invalid (empty) examples are filtered first; if nothing usable remains the
/// default profile is returned without a gateway call.
pub async fn analyze(
    examples: &[BrandVoiceExample],
    gateway: &dyn ModelGateway,
) -> BrandVoiceProfile {
    let valid: Vec<&BrandVoiceExample> = examples.iter().filter(|e| e.is_valid()).collect();

    if valid.is_empty() {
        info!("No valid brand voice examples — using default profile");
        return BrandVoiceProfile::default_profile();
    }

    let blocks = build_analysis_blocks(&valid);

    match gateway.invoke(&blocks, JSON_ONLY_SYSTEM).await {
        Ok(reply) => parse_profile(&reply).unwrap_or_else(|| {
            warn!("Brand voice analysis reply contained no parsable profile — using default");
            BrandVoiceProfile::default_profile()
        }),
        Err(e) => {
            warn!("Brand voice analysis call failed: {e} — using default profile");
            BrandVoiceProfile::default_profile()
        }
    }
}

/// Assembles the multimodal analysis prompt: one leading instruction block,
/// one segment per example, one trailing strict-JSON demand.
fn build_analysis_blocks(examples: &[&BrandVoiceExample]) -> Vec<PromptBlock> {
    let has_images = examples.iter().any(|e| e.has_image());

    let mut intro = ANALYSIS_INTRO.to_string();
    if has_images {
        intro.push(' ');
        intro.push_str(ANALYSIS_VISUAL_ADDENDUM);
    }

    let mut blocks = vec![PromptBlock::Text(intro)];

    for (i, example) in examples.iter().enumerate() {
        let n = i + 1;
        match example {
            BrandVoiceExample::Text { content } => {
                blocks.push(PromptBlock::text(format!("Example {n}:\n{content}")));
            }
            BrandVoiceExample::Image {
                data,
                media_type,
                caption,
            } => {
                if !data.trim().is_empty() {
                    blocks.push(PromptBlock::Image {
                        data: data.clone(),
                        media_type: media_type.clone(),
                    });
                }
                let label = match caption.as_deref().filter(|c| !c.trim().is_empty()) {
                    Some(c) => {
                        format!("Example {n} (image): {IMAGE_EXAMPLE_LABEL}. Caption: {c}")
                    }
                    None => format!("Example {n} (image): {IMAGE_EXAMPLE_LABEL}."),
                };
                blocks.push(PromptBlock::Text(label));
            }
            BrandVoiceExample::Mixed {
                data,
                media_type,
                caption,
            } => {
                if !data.trim().is_empty() {
                    blocks.push(PromptBlock::Image {
                        data: data.clone(),
                        media_type: media_type.clone(),
                    });
                }
                blocks.push(PromptBlock::text(format!(
                    "Example {n} (image with text): {MIXED_EXAMPLE_LABEL}.\n{caption}"
                )));
            }
        }
    }

    blocks.push(PromptBlock::text(ANALYSIS_OUTPUT_FORMAT));
    blocks
}

/// Extracts and parses the profile from a free-form model reply.
fn parse_profile(reply: &str) -> Option<BrandVoiceProfile> {
    let json = extract_json(reply)?;
    serde_json::from_str(json).ok()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Counts invocations and returns a canned reply (or a canned failure).
    struct CannedGateway {
        calls: AtomicUsize,
        reply: Result<String, ()>,
    }

    impl CannedGateway {
        fn replying(reply: &str) -> Self {
            CannedGateway {
                calls: AtomicUsize::new(0),
                reply: Ok(reply.to_string()),
            }
        }

        fn failing() -> Self {
            CannedGateway {
                calls: AtomicUsize::new(0),
                reply: Err(()),
            }
        }
    }

    #[async_trait]
    impl ModelGateway for CannedGateway {
        async fn invoke(
            &self,
            _blocks: &[PromptBlock],
            _system: &str,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::Api {
                    status: 500,
                    message: "overloaded".to_string(),
                }),
            }
        }
    }

    fn text_example(content: &str) -> BrandVoiceExample {
        BrandVoiceExample::Text {
            content: content.to_string(),
        }
    }

    const PROFILE_JSON: &str = r#"{"tone":"bold","style":"direct and vivid","terminology":["zero-config","battle-tested"],"structure":"claim then proof"}"#;

    #[tokio::test]
    async fn test_empty_input_returns_default_without_gateway_call() {
        let gateway = CannedGateway::replying(PROFILE_JSON);
        let profile = analyze(&[], &gateway).await;
        assert_eq!(profile, BrandVoiceProfile::default_profile());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_whitespace_only_examples_return_default_without_gateway_call() {
        let gateway = CannedGateway::replying(PROFILE_JSON);
        let profile = analyze(&[text_example("   "), text_example("")], &gateway).await;
        assert_eq!(profile, BrandVoiceProfile::default_profile());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_plain_json_reply_is_parsed() {
        let gateway = CannedGateway::replying(PROFILE_JSON);
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile.tone, "bold");
        assert_eq!(profile.terminology, vec!["zero-config", "battle-tested"]);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fenced_json_reply_is_parsed() {
        let fenced = format!("```json\n{PROFILE_JSON}\n```");
        let gateway = CannedGateway::replying(&fenced);
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile.tone, "bold");
    }

    #[tokio::test]
    async fn test_json_embedded_in_prose_is_parsed() {
        let wrapped = format!("Here is the brand voice profile:\n\n{PROFILE_JSON}\n\nEnjoy!");
        let gateway = CannedGateway::replying(&wrapped);
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile.structure, "claim then proof");
    }

    #[tokio::test]
    async fn test_reply_without_json_falls_back_to_default() {
        let gateway = CannedGateway::replying("Sorry, I cannot analyze that.");
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile, BrandVoiceProfile::default_profile());
    }

    #[tokio::test]
    async fn test_reply_missing_profile_field_falls_back_to_default() {
        let gateway = CannedGateway::replying(r#"{"tone":"bold","style":"direct"}"#);
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile, BrandVoiceProfile::default_profile());
    }

    #[tokio::test]
    async fn test_gateway_error_falls_back_to_default() {
        let gateway = CannedGateway::failing();
        let profile = analyze(&[text_example("We ship fast.")], &gateway).await;
        assert_eq!(profile, BrandVoiceProfile::default_profile());
    }

    #[test]
    fn test_text_examples_are_numbered_in_order() {
        let a = text_example("First voice sample.");
        let b = text_example("Second voice sample.");
        let blocks = build_analysis_blocks(&[&a, &b]);

        // intro + two examples + trailing output demand
        assert_eq!(blocks.len(), 4);
        match &blocks[1] {
            PromptBlock::Text(t) => assert!(t.starts_with("Example 1:")),
            other => panic!("expected text block, got {other:?}"),
        }
        match &blocks[2] {
            PromptBlock::Text(t) => assert!(t.starts_with("Example 2:")),
            other => panic!("expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_text_only_prompt_has_no_visual_instruction() {
        let a = text_example("Copy sample.");
        let blocks = build_analysis_blocks(&[&a]);
        match &blocks[0] {
            PromptBlock::Text(intro) => assert!(!intro.contains("color palette")),
            other => panic!("expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_image_example_adds_visual_instruction_and_image_block() {
        let image = BrandVoiceExample::Image {
            data: "QUJD".to_string(),
            media_type: "image/jpeg".to_string(),
            caption: Some("landing page hero".to_string()),
        };
        let blocks = build_analysis_blocks(&[&image]);

        match &blocks[0] {
            PromptBlock::Text(intro) => {
                assert!(intro.contains("color palette"));
                assert!(intro.contains("typography"));
            }
            other => panic!("expected text block, got {other:?}"),
        }
        match &blocks[1] {
            PromptBlock::Image { data, media_type } => {
                assert_eq!(data, "QUJD");
                assert_eq!(media_type, "image/jpeg");
            }
            other => panic!("expected image block, got {other:?}"),
        }
        match &blocks[2] {
            PromptBlock::Text(label) => assert!(label.contains("landing page hero")),
            other => panic!("expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_mixed_example_contributes_image_and_caption() {
        let mixed = BrandVoiceExample::Mixed {
            data: "QUJD".to_string(),
            media_type: "image/png".to_string(),
            caption: "Launch week is here.".to_string(),
        };
        let blocks = build_analysis_blocks(&[&mixed]);
        assert!(matches!(&blocks[1], PromptBlock::Image { .. }));
        match &blocks[2] {
            PromptBlock::Text(t) => {
                assert!(t.contains("jointly"));
                assert!(t.contains("Launch week is here."));
            }
            other => panic!("expected text block, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_block_demands_strict_json() {
        let a = text_example("Copy sample.");
        let blocks = build_analysis_blocks(&[&a]);
        match blocks.last().unwrap() {
            PromptBlock::Text(t) => {
                assert!(t.contains("ONLY a JSON object"));
                assert!(t.contains("\"terminology\""));
            }
            other => panic!("expected text block, got {other:?}"),
        }
    }
}
