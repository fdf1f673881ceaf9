// All LLM prompt constants for the brand voice analyzer.
// The JSON-only system prompt comes from llm_client::prompts.

/// Leading instruction block for every analysis prompt.
pub const ANALYSIS_INTRO: &str = "Analyze the following example content pieces \
    to determine the brand voice behind them. Identify the overall tone, the \
    writing style, recurring terminology or jargon, and how the content is \
    typically structured.";

/// Appended to the intro when at least one example carries an image.
pub const ANALYSIS_VISUAL_ADDENDUM: &str = "Some examples are images. For \
    those, also describe the visual style, color palette, typography, and \
    layout, and fold what they imply about the brand into the same profile.";

/// Label attached to each image-only example segment.
pub const IMAGE_EXAMPLE_LABEL: &str = "analyze the visual style of this image";

/// Label attached to each mixed image+text example segment.
pub const MIXED_EXAMPLE_LABEL: &str =
    "analyze this image and its accompanying text jointly";

/// Trailing instruction block demanding a strict JSON reply.
pub const ANALYSIS_OUTPUT_FORMAT: &str = r#"Respond with ONLY a JSON object with exactly these fields:
{
  "tone": "short label for the overall tone",
  "style": "description of the writing style (include visual style notes if images were provided)",
  "terminology": ["key", "terms", "and", "jargon"],
  "structure": "how the content is typically organized"
}"#;
