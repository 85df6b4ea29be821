//! Analyzer — pluggable, trait-based backend that turns resume text plus a job
//! description into an `AnalysisResult`.
//!
//! Default: `GenerativeAnalyzer` (prompt → LLM → parser).
//! `Pipeline` holds an `Arc<dyn Analyzer>`, chosen at startup by the composition root.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::analysis::models::{AnalysisError, AnalysisResult};
use crate::analysis::parser::parse_analysis;
use crate::analysis::prompts::build_prompt;
use crate::llm_client::{CompletionBackend, GeminiClient};

/// The analyzer trait. Implement this to swap backends without touching the pipeline,
/// handler, or caller code.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError>;
}

/// LLM-backed analyzer. One backend call per analysis, no retries.
pub struct GenerativeAnalyzer {
    backend: Arc<dyn CompletionBackend>,
}

impl GenerativeAnalyzer {
    /// Builds the analyzer over a `GeminiClient`.
    ///
    /// Fails with `ConfigurationError` when the credential is absent or blank, so a
    /// misconfigured deployment dies at startup instead of on its first request.
    pub fn new(api_key: Option<&str>, model: &str, api_base: &str) -> Result<Self, AnalysisError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AnalysisError::configuration("API_KEY is not configured"))?;

        let client = GeminiClient::new(api_key, model, api_base).map_err(|e| {
            AnalysisError::configuration(format!("failed to build LLM client: {e}"))
        })?;

        Ok(Self::with_backend(Arc::new(client)))
    }

    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Analyzer for GenerativeAnalyzer {
    async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(resume_text, job_description);

        let raw = self.backend.complete(&prompt).await.map_err(|e| {
            warn!("LLM backend call failed: {e}");
            AnalysisError::backend_unavailable(format!("LLM backend error: {e}"))
        })?;

        let raw = match raw {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!("LLM backend returned no text");
                return Err(AnalysisError::backend_unavailable("invalid response"));
            }
        };

        debug!("LLM backend returned {} chars", raw.len());
        parse_analysis(&raw)
    }
}
