//! HTTP error mapping for API handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use zencode_core::AppError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// [`AppError`] plus the message exposed to clients for server-side failures.
#[derive(Debug)]
pub struct HttpError {
    error: AppError,
    public_message: &'static str,
}

impl HttpError {
    /// Wrap `error`, replacing its text with `public_message` when it maps to a 500.
    pub fn with_message(error: AppError, public_message: &'static str) -> Self {
        Self {
            error,
            public_message,
        }
    }
}

impl From<AppError> for HttpError {
    fn from(error: AppError) -> Self {
        Self::with_message(error, INTERNAL_MESSAGE)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self.error {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            err => {
                tracing::error!(transient = err.is_transient(), "{}: {}", self.public_message, err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.public_message.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::HttpError;
    use axum::{http::StatusCode, response::IntoResponse};
    use std::time::Duration;
    use zencode_core::AppError;

    async fn error_message(err: HttpError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        (status, body["error"].as_str().expect("error field").to_string())
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::BadRequest("Code is required".to_string()), StatusCode::BAD_REQUEST),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::StoreTimeout(Duration::from_millis(10)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Codec("bad".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::StoreUnavailable("down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            let response = HttpError::with_message(error, "Failed to share code").into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn server_errors_hide_details_behind_public_message() {
        let (status, message) = error_message(HttpError::with_message(
            AppError::StoreUnavailable("connection refused to 10.0.0.5".to_string()),
            "Failed to load code",
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Failed to load code");

        let (status, message) =
            error_message(HttpError::from(AppError::Codec("bad base64".to_string()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let (status, message) =
            error_message(HttpError::from(AppError::BadRequest("Code is required".to_string())))
                .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Code is required");

        let (status, message) = error_message(HttpError::from(AppError::NotFound)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Not found");
    }
}
