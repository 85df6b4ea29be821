use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::models::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Analysis(e) if e.kind.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Validation(msg) => tracing::info!("Validation error: {msg}"),
            AppError::PayloadTooLarge(msg) => tracing::info!("Upload over size limit: {msg}"),
            AppError::Analysis(e) if status.is_client_error() => {
                tracing::info!("Input rejected ({}): {}", e.kind, e.message)
            }
            AppError::Analysis(e) => tracing::error!("Analysis error ({}): {}", e.kind, e.message),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::AnalysisErrorKind;

    fn status_for(kind: AnalysisErrorKind) -> StatusCode {
        AppError::from(AnalysisError::new(kind, "x")).status()
    }

    #[test]
    fn test_input_errors_map_to_bad_request() {
        assert_eq!(status_for(AnalysisErrorKind::InputRejected), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(AnalysisErrorKind::UnsupportedFormat), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(AnalysisErrorKind::ExtractionFailed), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::Validation("file not received".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_oversized_body_maps_to_payload_too_large() {
        let err = AppError::PayloadTooLarge("length limit exceeded".to_string());
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "length limit exceeded");
    }

    #[test]
    fn test_service_errors_map_to_server_error() {
        for kind in [
            AnalysisErrorKind::BackendUnavailable,
            AnalysisErrorKind::MalformedResponse,
            AnalysisErrorKind::ConfigurationError,
        ] {
            assert_eq!(status_for(kind), StatusCode::INTERNAL_SERVER_ERROR, "{kind}");
        }
    }

    #[test]
    fn test_error_body_is_flat_message() {
        let err = AppError::from(AnalysisError::malformed_response("bad json"));
        assert_eq!(err.to_string(), "bad json");
    }
}
