// All LLM prompt constants and builders for the Generation module.

use crate::generation::formats::ContentFormat;
use crate::voice::models::BrandVoiceProfile;

/// System prompt template. Replace `{industry}` before sending.
const GENERATION_SYSTEM_TEMPLATE: &str = "You are an expert marketing content \
    writer for the {industry} industry. Write compelling, on-brand copy \
    tailored to the requested format. Output only the requested content, with \
    no commentary before or after it.";

/// Builds the role-framing system prompt for one generation call.
pub fn generation_system(industry: &str) -> String {
    GENERATION_SYSTEM_TEMPLATE.replace("{industry}", industry)
}

/// Assembles the single generation prompt: topic, industry, the format's
/// instruction, and the brand-voice block when a profile is supplied.
pub fn build_generation_prompt(
    topic: &str,
    industry: &str,
    format: ContentFormat,
    profile: Option<&BrandVoiceProfile>,
) -> String {
    let mut prompt = format!(
        "Topic: {topic}\nIndustry: {industry}\n\n{}",
        format.instruction()
    );

    if let Some(profile) = profile {
        prompt.push_str("\n\n");
        prompt.push_str(&voice_match_block(profile));
    }

    prompt
}

/// The "match this voice exactly" block appended when a profile is supplied.
fn voice_match_block(profile: &BrandVoiceProfile) -> String {
    format!(
        "Match this brand voice exactly:\n\
         - Tone: {}\n\
         - Style: {}\n\
         - Key terminology to work in naturally: {}\n\
         - Typical structure: {}",
        profile.tone,
        profile.style,
        profile.terminology.join(", "),
        profile.structure
    )
}
