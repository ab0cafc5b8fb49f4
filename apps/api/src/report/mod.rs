// Report generation pipeline.
// Implements: identity filtering, model formatting, orchestration, HTTP handlers.
// All model calls go through llm_client — no direct DeepSeek calls here.

pub mod filter;
pub mod formatter;
pub mod handlers;
pub mod pipeline;
