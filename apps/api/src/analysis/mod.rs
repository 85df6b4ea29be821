// Resume/job compatibility analysis.
// Implements: prompt rendering, backend call, response validation, and the upload pipeline.
// All model calls go through llm_client; nothing here talks to the provider directly.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prompts;

