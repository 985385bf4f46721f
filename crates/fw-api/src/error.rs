use std::{borrow::Cow, future::Future};

use axum::{Json, http::StatusCode, response::IntoResponse};
use fw_common::MatchError;
use fw_common::store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

tokio::task_local! {
    static REQUEST_ID: String;
}

fn sanitize_message(message: &str) -> String {
    const MAX_LEN: usize = 240;

    let mut cleaned = message
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace(['\n', '\r'], " ");

    cleaned = cleaned
        .split_whitespace()
        .map(|token| {
            if token.contains("://") {
                "[redacted-url]".to_string()
            } else if let Some((base, _)) = token.split_once('?') {
                if base.is_empty() {
                    "[redacted-query]".to_string()
                } else {
                    format!("{base}?[redacted]")
                }
            } else if token.starts_with('/') || token.contains('\\') {
                "[redacted-path]".to_string()
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if let Some((cut, _)) = cleaned.char_indices().nth(MAX_LEN) {
        cleaned.truncate(cut);
        cleaned.push_str("...");
    }

    if cleaned.trim().is_empty() {
        "unexpected error".to_string()
    } else {
        cleaned
    }
}

pub async fn with_request_id<Fut, T>(request_id: Option<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    if let Some(request_id) = request_id {
        REQUEST_ID.scope(request_id, fut).await
    } else {
        fut.await
    }
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|value| value.clone()).ok()
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("too many requests: {0}")]
    TooManyRequests(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
    request_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let code = self.code();
        let request_id = current_request_id();

        if status.is_server_error() {
            error!(
                code,
                status = %status,
                request_id = request_id.as_deref().unwrap_or(""),
                error = %self,
                "api_error"
            );
        } else {
            warn!(
                code,
                status = %status,
                request_id = request_id.as_deref().unwrap_or(""),
                error = %self,
                "api_error"
            );
        }

        let body = Json(ErrorResponse {
            code,
            message: self.public_message().into_owned(),
            request_id,
        });

        (status, body).into_response()
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::TooManyRequests(_) => "too_many_requests",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> Cow<'static, str> {
        match self {
            ApiError::BadRequest(msg) => Cow::Owned(sanitize_message(msg)),
            ApiError::TooManyRequests(_) => Cow::Borrowed("too many requests"),
            ApiError::ServiceUnavailable(_) => Cow::Borrowed("service unavailable"),
            ApiError::Internal(_) => Cow::Borrowed("internal server error"),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        ApiError::ServiceUnavailable(value.to_string())
    }
}

impl From<MatchError> for ApiError {
    fn from(value: MatchError) -> Self {
        match value {
            MatchError::InvalidCriteria(msg) => ApiError::BadRequest(msg),
            MatchError::Collaborator(err) => err.into(),
            MatchError::Configuration(err) => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use super::*;

    #[tokio::test]
    async fn includes_request_id_in_response_body_when_present() {
        let err = ApiError::Internal("boom".into());
        let response = with_request_id(Some("req-123".into()), async { err.into_response() }).await;

        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["request_id"], "req-123");
    }

    #[tokio::test]
    async fn store_outage_maps_to_service_unavailable() {
        let err = ApiError::from(MatchError::Collaborator(StoreError::Unavailable(
            "postgres://user:secret@db/flexwork refused".into(),
        )));

        let (parts, body) = err.into_response().into_parts();
        assert_eq!(parts.status, StatusCode::SERVICE_UNAVAILABLE);
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "service_unavailable");
        assert_eq!(json["message"], "service unavailable");
    }

    #[test]
    fn invalid_criteria_maps_to_bad_request() {
        let err = ApiError::from(MatchError::InvalidCriteria("limit must be positive".into()));

        assert!(matches!(err, ApiError::BadRequest(ref msg) if msg == "limit must be positive"));
    }

    #[test]
    fn sanitize_truncates_on_char_boundary() {
        let cleaned = sanitize_message(&"ü".repeat(300));

        assert_eq!(cleaned.chars().count(), 243);
        assert!(cleaned.ends_with("..."));
    }

    #[test]
    fn configuration_error_is_internal() {
        let err = ApiError::from(MatchError::Configuration(
            fw_common::matching::WeightTableError::SumMismatch {
                table: "worker_matching",
                sum: 0.9,
            },
        ));

        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn sanitize_redacts_urls_and_paths() {
        let cleaned = sanitize_message("bad input at /etc/passwd via https://x.io/a?b=c");

        assert_eq!(cleaned, "bad input at [redacted-path] via [redacted-url]");
    }
}
