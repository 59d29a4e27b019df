//! Proxy-originated responses.
//!
//! # Responsibilities
//! - Status page for an inert proxy (no target configured)
//! - Map forwarding failures to client-facing statuses
//!
//! # Design Decisions
//! - Only used when no backend byte has been relayed yet
//! - Timeouts map to 504 Gateway Timeout, every other backend failure
//!   to 502 Bad Gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::proxy::ProxyError;

/// Response for a request that arrived while no target is configured.
pub fn not_configured() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "Proxy target not configured").into_response()
}

impl ProxyError {
    /// Status returned to the client for this failure.
    pub fn status_code(&self) -> StatusCode {
        if self.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(kind = self.kind(), error = %self, status = status.as_u16(), "Forwarding failed");
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_is_503() {
        assert_eq!(not_configured().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_invalid_target_is_502() {
        let err = ProxyError::InvalidTargetUri {
            uri: "nope/x".into(),
            reason: "relative URL without a base".into(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
