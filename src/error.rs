// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::providers::{LookupError, OAuthError};
use crate::storage::{BlobError, StoreError};

/// Failure of a proxy operation, independent of the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid public key encoding: {0}")]
    InvalidKeyEncoding(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    OAuth(#[from] OAuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Blob(#[from] BlobError),

    #[error("fan-out task failed: {0}")]
    FanOut(String),
}

impl ProxyError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_)
            | ProxyError::InvalidKeyEncoding(_)
            | ProxyError::InvalidSignature(_) => StatusCode::BAD_REQUEST,
            ProxyError::Lookup(_) => StatusCode::BAD_GATEWAY,
            ProxyError::OAuth(_) => StatusCode::UNAUTHORIZED,
            ProxyError::Store(_) | ProxyError::Blob(_) | ProxyError::FanOut(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        let status = err.status();
        if status.is_server_error() {
            error!(error = %err, status = %status, "Request failed");
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "bad");

        let internal = ApiError::internal("boom");
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "boom");
    }

    #[test]
    fn proxy_errors_map_to_statuses() {
        let cases = [
            (ProxyError::validation("empty"), StatusCode::BAD_REQUEST),
            (
                ProxyError::InvalidKeyEncoding("odd length".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProxyError::InvalidSignature("mismatch".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ProxyError::Lookup(LookupError::Timeout),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ProxyError::OAuth(OAuthError::Rejected("401".into())),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ProxyError::Store(StoreError::Poisoned),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProxyError::FanOut("panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::from(ProxyError::validation("userAddress is required"))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"userAddress is required"}"#);
    }
}
