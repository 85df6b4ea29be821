//! Evaluation pipeline: extract text, then analyze it. Fails fast at extraction.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::models::{AnalysisError, AnalysisResult};
use crate::extraction::{extract, Document, ExtractedText, ExtractionError};

#[derive(Clone)]
pub struct Pipeline {
    analyzer: Arc<dyn Analyzer>,
}

impl Pipeline {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Evaluates one uploaded resume against a job description (possibly empty).
    ///
    /// Extraction failures are returned as `InputRejected` and the analyzer is never called.
    /// Analyzer outcomes are returned unchanged.
    pub async fn evaluate(
        &self,
        document: Document,
        job_description: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let text = extract_blocking(document).await.map_err(|e| {
            info!("Rejected upload ({}): {e}", e.kind());
            AnalysisError::from(e)
        })?;

        if text.is_blank() {
            warn!("Document has no extractable text; analyzing anyway");
        }

        self.analyzer.analyze(text.as_str(), job_description).await
    }
}

/// Runs extraction on the blocking pool; PDF parsing is CPU-bound.
async fn extract_blocking(document: Document) -> Result<ExtractedText, ExtractionError> {
    tokio::task::spawn_blocking(move || extract(&document))
        .await
        .map_err(|e| ExtractionError::ExtractionFailed(format!("extraction task failed: {e}")))?
}
