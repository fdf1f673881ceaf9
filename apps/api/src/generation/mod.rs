// Content Generation Engine
// Implements: format templates, per-format generation, consistency scoring,
// and the request orchestrator with its concurrent fan-out.
// All LLM calls go through llm_client — no direct Anthropic SDK calls here.

pub mod formats;
pub mod generator;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
