//! Format Content Generator — one model call per requested format.
//!
//! Never returns a hard failure: a gateway error for one format becomes a
//! human-readable error string in that format's `content` slot, so the rest
//! of the batch is unaffected.

use serde::Serialize;
use tracing::warn;

use crate::generation::formats::ContentFormat;
use crate::generation::prompts::{build_generation_prompt, generation_system};
use crate::llm_client::{ModelGateway, PromptBlock};
use crate::voice::models::BrandVoiceProfile;

/// One generated result item. `consistency_score` is present only when a
/// brand-voice profile steered the generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub format: ContentFormat,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_score: Option<f64>,
}

/// Generates content for one format.
pub async fn generate_for_format(
    gateway: &dyn ModelGateway,
    topic: &str,
    industry: &str,
    format: ContentFormat,
    profile: Option<&BrandVoiceProfile>,
) -> GeneratedContent {
    let prompt = build_generation_prompt(topic, industry, format, profile);
    let system = generation_system(industry);

    match gateway
        .invoke(&[PromptBlock::Text(prompt)], &system)
        .await
    {
        Ok(text) => {
            let consistency_score = profile.map(|p| consistency_score(&text, p));
            GeneratedContent {
                format,
                content: text,
                consistency_score,
            }
        }
        Err(e) => {
            warn!("Generation failed for {} content: {e}", format.label());
            GeneratedContent {
                format,
                content: format!("Error generating {} content: {e}", format.label()),
                consistency_score: None,
            }
        }
    }
}

/// Heuristic brand-consistency score in [0, 95].
///
/// A cheap lexical proxy, not semantic similarity: it rewards literal reuse
/// of the profile's terminology. The formula is user-visible output, so it
/// must stay exactly `min(95, 70 + 25 * matchedFraction)` with a fixed 75
/// when the profile has no terminology.
pub fn consistency_score(text: &str, profile: &BrandVoiceProfile) -> f64 {
    if profile.terminology.is_empty() {
        return 75.0;
    }

    let haystack = text.to_lowercase();
    let matched = profile
        .terminology
        .iter()
        .filter(|term| haystack.contains(&term.to_lowercase()))
        .count();
    let matched_fraction = matched as f64 / profile.terminology.len() as f64;

    (70.0 + 25.0 * matched_fraction).min(95.0)
}
