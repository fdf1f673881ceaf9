// Brand voice calibration: example normalization, multimodal analysis prompt
// assembly, and profile inference. All LLM calls go through llm_client.

pub mod analyzer;
pub mod models;
pub mod prompts;
