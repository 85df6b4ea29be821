//! Result parser — decodes and validates the backend's raw text into an `AnalysisResult`.
//!
//! Policy: the score is strict (present, integral, within 0 – 100, otherwise the whole
//! response is rejected), the three lists are lenient (absent or null means empty).

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::analysis::models::{AnalysisError, AnalysisResult};
use crate::analysis::prompts::NOT_A_RESUME_SENTINEL;

const MAX_SCORE: i64 = 100;

/// Wire shape of the backend payload, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    compatibility_score: Option<Number>,
    matching_skills: Option<Vec<String>>,
    missing_skills: Option<Vec<String>>,
    recommendations: Option<Vec<String>>,
}

/// Parses raw backend output. A not-a-resume sentinel yields `InputRejected`.
pub fn parse_analysis(raw_text: &str) -> Result<AnalysisResult, AnalysisError> {
    let text = strip_json_fences(raw_text);

    if is_not_a_resume(text) {
        return Err(AnalysisError::input_rejected(
            "the uploaded document is not a resume",
        ));
    }

    let value: Value = serde_json::from_str(text).map_err(|e| {
        AnalysisError::malformed_response(format!("backend returned invalid JSON: {e}"))
    })?;
    if !value.is_object() {
        return Err(AnalysisError::malformed_response(
            "backend returned JSON that is not an object",
        ));
    }
    let raw: RawAnalysis = serde_json::from_value(value).map_err(|e| {
        AnalysisError::malformed_response(format!("backend response has the wrong shape: {e}"))
    })?;

    let score = raw.compatibility_score.ok_or_else(|| {
        AnalysisError::malformed_response("backend response is missing compatibilityScore")
    })?;

    Ok(AnalysisResult {
        compatibility_score: validate_score(&score)?,
        matching_skills: raw.matching_skills.unwrap_or_default(),
        missing_skills: raw.missing_skills.unwrap_or_default(),
        recommendations: raw.recommendations.unwrap_or_default(),
    })
}

fn validate_score(score: &Number) -> Result<u8, AnalysisError> {
    let value = match (score.as_i64(), score.as_f64()) {
        (Some(v), _) => v,
        (None, Some(f)) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => f as i64,
        _ => {
            return Err(AnalysisError::malformed_response(format!(
                "compatibilityScore must be an integer, got {score}"
            )))
        }
    };

    if !(0..=MAX_SCORE).contains(&value) {
        return Err(AnalysisError::malformed_response(format!(
            "compatibilityScore {value} is outside 0-{MAX_SCORE}"
        )));
    }
    Ok(value as u8)
}

/// Recognizes the sentinel bare, quoted, with trailing punctuation, or as `{"error": ...}`.
fn is_not_a_resume(text: &str) -> bool {
    let bare = text.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '.');
    if bare.eq_ignore_ascii_case(NOT_A_RESUME_SENTINEL) {
        return true;
    }

    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .is_some_and(|e| e.trim().eq_ignore_ascii_case(NOT_A_RESUME_SENTINEL))
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
