//! Language detection handler.

use super::request::require_code;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use zencode_core::classify;

/// Classify `code` without storing it.
///
/// # Returns
/// `{language, label}` where `language` is the canonical tag.
///
/// # Errors
/// 400 when `code` is missing, empty, or oversized.
pub async fn detect_language(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, HttpError> {
    let code = require_code(payload, state.config.max_code_size)?;
    let language = classify(&code);
    Ok(Json(json!({
        "language": language,
        "label": language.label(),
    })))
}
