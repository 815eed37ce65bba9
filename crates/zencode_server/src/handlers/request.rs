//! Request body and origin helpers shared by handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use zencode_core::{AppError, Config};

pub(crate) const CODE_REQUIRED: &str = "Code is required";

/// Headroom for JSON framing and string escapes on top of the raw code size.
const BODY_OVERHEAD: usize = 64 * 1024;

pub(crate) fn request_body_limit(max_code_size: usize) -> usize {
    max_code_size.saturating_mul(2).saturating_add(BODY_OVERHEAD)
}

fn too_large(max_code_size: usize) -> AppError {
    AppError::BadRequest(format!(
        "Code exceeds maximum size of {} bytes",
        max_code_size
    ))
}

/// Pull a non-empty string `code` field out of a JSON body.
pub(crate) fn require_code(
    payload: Result<Json<Value>, JsonRejection>,
    max_code_size: usize,
) -> Result<String, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            too_large(max_code_size)
        } else {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            AppError::BadRequest(CODE_REQUIRED.to_string())
        }
    })?;

    let code = match body {
        Value::Object(mut map) => match map.remove("code") {
            Some(Value::String(code)) if !code.is_empty() => code,
            _ => return Err(AppError::BadRequest(CODE_REQUIRED.to_string())),
        },
        _ => return Err(AppError::BadRequest(CODE_REQUIRED.to_string())),
    };

    if code.len() > max_code_size {
        return Err(too_large(max_code_size));
    }
    Ok(code)
}

fn is_plausible_host(host: &str) -> bool {
    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']'))
}

/// Origin used to build share URLs for this request.
///
/// `PUBLIC_URL` wins; otherwise the `Host` header (with `x-forwarded-proto`
/// when it names http or https); otherwise the configured default.
pub(crate) fn request_base_url(config: &Config, headers: &HeaderMap) -> String {
    if let Some(public_url) = &config.public_url {
        return public_url.clone();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| is_plausible_host(host));
    let Some(host) = host else {
        return config.default_base_url();
    };

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| value == "http" || value == "https")
        .unwrap_or_else(|| "http".to_string());
    format!("{}://{}", scheme, host)
}

#[cfg(test)]
mod tests {
    use super::{request_base_url, require_code, CODE_REQUIRED};
    use axum::{
        http::{header, HeaderMap, HeaderValue},
        Json,
    };
    use serde_json::json;
    use zencode_core::{AppError, Config};

    fn config(public_url: Option<&str>) -> Config {
        let public_url = public_url.map(str::to_string);
        Config::from_lookup(move |name| match name {
            "PORT" => Some("8123".to_string()),
            "PUBLIC_URL" => public_url.clone(),
            _ => None,
        })
    }

    fn bad_request_message(result: Result<String, AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn require_code_accepts_non_empty_strings() {
        let code = require_code(Ok(Json(json!({ "code": "  x = 1  " }))), 100).expect("code");
        assert_eq!(code, "  x = 1  ");
    }

    #[test]
    fn require_code_rejects_missing_empty_and_non_string_values() {
        for body in [
            json!({}),
            json!({ "code": "" }),
            json!({ "code": 42 }),
            json!({ "code": null }),
            json!(["code"]),
        ] {
            let msg = bad_request_message(require_code(Ok(Json(body.clone())), 100));
            assert_eq!(msg, CODE_REQUIRED, "body: {}", body);
        }
    }

    #[test]
    fn require_code_enforces_size_limit_in_bytes() {
        let msg = bad_request_message(require_code(Ok(Json(json!({ "code": "é".repeat(3) }))), 5));
        assert!(msg.contains("maximum size of 5 bytes"));
        assert!(require_code(Ok(Json(json!({ "code": "abcde" }))), 5).is_ok());
    }

    #[test]
    fn base_url_prefers_public_url() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ignored.test"));
        assert_eq!(
            request_base_url(&config(Some("https://zen.example/")), &headers),
            "https://zen.example"
        );
    }

    #[test]
    fn base_url_uses_host_and_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("zen.test:9000"));
        assert_eq!(request_base_url(&config(None), &headers), "http://zen.test:9000");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("HTTPS"));
        assert_eq!(request_base_url(&config(None), &headers), "https://zen.test:9000");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("gopher"));
        assert_eq!(request_base_url(&config(None), &headers), "http://zen.test:9000");
    }

    #[test]
    fn base_url_falls_back_without_usable_host() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_base_url(&config(None), &headers), "http://localhost:8123");

        headers.insert(header::HOST, HeaderValue::from_static("evil.test/path"));
        assert_eq!(request_base_url(&config(None), &headers), "http://localhost:8123");
    }
}
