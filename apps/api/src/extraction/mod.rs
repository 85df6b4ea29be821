//! Text extraction — normalizes uploaded resume documents into plain text.
//!
//! Dispatch is a closed switch over the declared format tag. No content sniffing:
//! a PDF uploaded as `resume.docx` is parsed as DOCX and fails as such.

use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use crate::analysis::models::AnalysisErrorKind;

pub mod docx;
pub mod pdf;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported document format '{0}' (expected pdf or docx)")]
    UnsupportedFormat(String),

    #[error("could not read document: {0}")]
    ExtractionFailed(String),
}

impl ExtractionError {
    pub fn kind(&self) -> AnalysisErrorKind {
        match self {
            ExtractionError::UnsupportedFormat(_) => AnalysisErrorKind::UnsupportedFormat,
            ExtractionError::ExtractionFailed(_) => AnalysisErrorKind::ExtractionFailed,
        }
    }
}

/// The closed set of formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Resolves an extension (`pdf`, `.DOCX`) or a MIME type into a format.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        match tag.trim_start_matches('.') {
            "pdf" | PDF_MIME => Some(DocumentFormat::Pdf),
            "docx" | DOCX_MIME => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => f.write_str("pdf"),
            DocumentFormat::Docx => f.write_str("docx"),
        }
    }
}

/// An uploaded document: raw bytes plus the declared format tag.
///
/// The tag is kept verbatim so an unsupported one can be reported back by `extract`.
#[derive(Debug, Clone)]
pub struct Document {
    pub content: Bytes,
    pub format_tag: String,
}

impl Document {
    pub fn new(content: impl Into<Bytes>, format_tag: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            format_tag: format_tag.into(),
        }
    }

    /// Builds a document from upload metadata.
    ///
    /// Precedence: explicit hint, then the filename extension, then the part's content type.
    /// The first candidate that names a supported format wins; otherwise the first candidate
    /// present is kept so the error message names what the client actually sent.
    pub fn from_upload(
        content: impl Into<Bytes>,
        format_hint: Option<&str>,
        file_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Self {
        let extension = file_name.and_then(file_extension);
        let candidates: Vec<&str> = [format_hint, extension, content_type]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();

        let format_tag = candidates
            .iter()
            .find(|c| DocumentFormat::from_tag(c).is_some())
            .or_else(|| candidates.first())
            .map(|c| c.to_string())
            .unwrap_or_default();

        Self::new(content, format_tag)
    }
}

fn file_extension(file_name: &str) -> Option<&str> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
}

/// Plain text extracted from a document. May be empty when the document has no text layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the document parsed fine but contained no text.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Extracts plain text from `document`, dispatching on its declared format.
pub fn extract(document: &Document) -> Result<ExtractedText, ExtractionError> {
    let format = DocumentFormat::from_tag(&document.format_tag)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(document.format_tag.clone()))?;

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_text(&document.content)?,
        DocumentFormat::Docx => docx::extract_text(&document.content)?,
    };

    tracing::debug!(
        "Extracted {} chars from {} document ({} bytes)",
        text.chars().count(),
        format,
        document.content.len()
    );

    Ok(ExtractedText::new(text))
}
