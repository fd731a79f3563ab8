//! Error types for the proxy and the interception lifecycle.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Failure of the single outbound call to the backend function.
///
/// Every variant is answered the same way: logged, then turned into
/// `{"error": message}` with a 500.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Unreachable(String),

    #[error("HTTP {0}")]
    Rejected(u16),

    #[error("invalid backend response: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::InvalidBody(err.to_string())
        } else {
            BackendError::Unreachable(err.to_string())
        }
    }
}

impl BackendError {
    /// Log the failure and give the status and body it is answered with.
    pub fn into_status_body(self) -> (StatusCode, ErrorBody) {
        tracing::error!("Gigya API call failed: {}", self);
        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let (status, body) = self.into_status_body();
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("interceptor is already registered")]
    AlreadyRegistered,

    #[error("cannot {action} while interceptor is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_backend_error_becomes_json_500() {
        let response = BackendError::Rejected(502).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "HTTP 502");
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            BackendError::Unreachable("connection refused".into()).to_string(),
            "connection refused"
        );
        assert_eq!(
            LifecycleError::InvalidTransition {
                action: "activate",
                state: "unregistered"
            }
            .to_string(),
            "cannot activate while interceptor is unregistered"
        );
    }
}
