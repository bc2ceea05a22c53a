// Card generation engine.
// Implements: intro validation, producer policy, remote prompt/sanitize
// pipeline, and the deterministic template fallback.
// All LLM calls go through llm_client — no direct DeepSeek calls here.

pub mod handlers;
pub mod producer;
pub mod prompts;
pub mod sanitize;
pub mod skills;
pub mod template;
