use crate::metrics::UPSTREAM_ERRORS;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

// Client-facing error kinds. Everything except Internal is an expected
// condition reported with a specific status and a short plain-text
// body; the proxy never retries on the client's behalf.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("too many requests")]
    RateLimited,

    #[error("missing query parameter: {0}")]
    MissingParam(&'static str),

    #[error("invalid target url: {0}")]
    InvalidTarget(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests. Try again later.".to_string(),
            ),
            ProxyError::MissingParam(name) => (
                StatusCode::BAD_REQUEST,
                format!("Missing query parameter: {name}"),
            ),
            ProxyError::InvalidTarget(url) => {
                warn!(target = %url, "rejected invalid target url");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid target URL. Only absolute http/https URLs are supported.".to_string(),
                )
            }
            ProxyError::Upstream(err) => {
                UPSTREAM_ERRORS.inc();
                warn!(error = %err, "upstream request failed");
                (StatusCode::BAD_GATEWAY, "Upstream request failed.".to_string())
            }
            ProxyError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed.".to_string())
            }
            // detail is logged, never sent to the client
            ProxyError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error.".to_string())
            }
        };
        (status, body).into_response()
    }
}
