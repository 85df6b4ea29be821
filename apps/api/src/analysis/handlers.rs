//! Axum route handler for the resume upload API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::models::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::Document;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
}

/// Multipart fields of one upload, before validation.
#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    job_description: Option<String>,
    format_hint: Option<String>,
}

struct UploadedFile {
    content: Bytes,
    file_name: Option<String>,
    content_type: Option<String>,
}

/// POST /api/upload
///
/// Multipart form: `file` (required), `job_description` (optional, defaults to empty),
/// `format` (optional hint overriding the filename extension).
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let form = read_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| AppError::Validation("file not received".to_string()))?;
    let job_description = form.job_description.unwrap_or_default();

    let document = Document::from_upload(
        file.content,
        form.format_hint.as_deref(),
        file.file_name.as_deref(),
        file.content_type.as_deref(),
    );

    let request_id = Uuid::new_v4();
    let span = info_span!("upload", %request_id, format = %document.format_tag);

    async move {
        info!(
            "Evaluating {} byte upload against {} char job description",
            document.content.len(),
            job_description.len()
        );
        let analysis = state.pipeline.evaluate(document, &job_description).await?;
        info!("Compatibility score {}", analysis.compatibility_score);
        Ok::<_, AppError>(Json(AnalysisResponse { analysis }))
    }
    .instrument(span)
    .await
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("invalid multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("could not read file", e))?;
                form.file = Some(UploadedFile {
                    content,
                    file_name,
                    content_type,
                });
            }
            "job_description" | "format" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&format!("could not read {name}"), e))?;
                if name == "format" {
                    form.format_hint = Some(value);
                } else {
                    form.job_description = Some(value);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// A body cut off by `DefaultBodyLimit` surfaces here as a multipart error; keep its 413.
fn multipart_error(context: &str, e: MultipartError) -> AppError {
    let message = format!("{context}: {}", e.body_text());
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::Validation(message)
    }
}
