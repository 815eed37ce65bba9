//! Share, load, and raw-view handlers.

use super::request::{request_base_url, require_code};
use crate::{error::HttpError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use zencode_core::classify;

const LANGUAGE_HEADER: HeaderName = HeaderName::from_static("x-zencode-language");
const ALREADY_EXISTS_MESSAGE: &str = "Code already exists, returning existing URL";
const SHARE_FAILED: &str = "Failed to share code";
const LOAD_FAILED: &str = "Failed to load code";

/// Store code and return its canonical share URL.
///
/// # Returns
/// `{success, id, url, language}`; repeat shares of the same text also carry
/// `message` and perform no write.
///
/// # Errors
/// 400 for a missing or oversized `code`, 500 when the store fails.
pub async fn store_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, HttpError> {
    let code = require_code(payload, state.config.max_code_size)?;
    let base_url = request_base_url(&state.config, &headers);

    let result = state
        .gateway
        .share_at(&code, &base_url)
        .await
        .map_err(|err| HttpError::with_message(err, SHARE_FAILED))?;
    let language = classify(&code);

    state.tracker.track(
        "code_shared",
        json!({
            "id": result.id,
            "isNew": result.is_new,
            "language": language,
            "bytes": code.len(),
        }),
    );

    let mut body = json!({
        "success": true,
        "id": result.id,
        "url": result.url,
        "language": language,
    });
    if !result.is_new {
        body["message"] = json!(ALREADY_EXISTS_MESSAGE);
    }
    Ok(Json(body))
}

/// Load stored code by id.
///
/// # Errors
/// 404 for unknown ids, 500 when the store fails or the payload is corrupt.
pub async fn get_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let code = state
        .gateway
        .resolve(&id)
        .await
        .map_err(|err| HttpError::with_message(err, LOAD_FAILED))?;
    let language = classify(&code);
    state
        .tracker
        .track("code_viewed", json!({ "id": id, "language": language }));

    Ok(Json(json!({
        "id": id,
        "code": code,
        "language": language,
    })))
}

/// Serve stored code as plain text, with the detected language in a header.
pub async fn view_share(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let code = state
        .gateway
        .resolve(&id)
        .await
        .map_err(|err| HttpError::with_message(err, LOAD_FAILED))?;
    let language = classify(&code);
    state
        .tracker
        .track("code_viewed", json!({ "id": id, "language": language }));

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (LANGUAGE_HEADER, HeaderValue::from_static(language.as_str())),
        ],
        code,
    )
        .into_response())
}

/// Reply for unsupported methods on `/api/store`.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
