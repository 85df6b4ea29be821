use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extraction::ExtractionError;

/// Structured fit report for one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Always within 0 – 100.
    pub compatibility_score: u8,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisErrorKind {
    UnsupportedFormat,
    ExtractionFailed,
    ConfigurationError,
    BackendUnavailable,
    MalformedResponse,
    InputRejected,
}

impl fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl AnalysisErrorKind {
    /// Whether the failure is attributable to the uploaded input rather than the service.
    pub fn is_client_error(self) -> bool {
        matches!(
            self,
            AnalysisErrorKind::UnsupportedFormat
                | AnalysisErrorKind::ExtractionFailed
                | AnalysisErrorKind::InputRejected
        )
    }
}

/// Terminal failure of an analysis request. Never carries a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::ConfigurationError, message)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::BackendUnavailable, message)
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::MalformedResponse, message)
    }

    pub fn input_rejected(message: impl Into<String>) -> Self {
        Self::new(AnalysisErrorKind::InputRejected, message)
    }
}

/// Any extraction failure rejects the input before analysis starts.
impl From<ExtractionError> for AnalysisError {
    fn from(err: ExtractionError) -> Self {
        AnalysisError::input_rejected(err.to_string())
    }
}
