//! Forwarding engine.
//!
//! # Responsibilities
//! - Take one snapshot of the backend target per request
//! - Build exactly one backend request from the client request
//! - Send it once and relay the response back
//!
//! # Design Decisions
//! - No retries, no request forking
//! - The method is copied as-is, including extension methods
//! - The backend URI is the base URI followed by the request path and
//!   query, joined as text without normalization
//! - Transport failures are classified and returned to the caller, which
//!   picks the client-facing status

use std::sync::Arc;

use axum::extract::Request;
use axum::http::uri::{PathAndQuery, Scheme};
use axum::http::Uri;
use axum::response::Response;

use crate::config::TargetConfig;
use crate::http::request::RequestSummary;
use crate::proxy::error::ProxyError;
use crate::proxy::transport::BackendClient;
use crate::proxy::{body, headers};

/// Result of a forwarding attempt that did not fail.
#[derive(Debug)]
pub enum Forwarded {
    /// The backend answered; this is the response to send to the client.
    Relayed(Response),
    /// No target is set, so nothing was sent.
    NotConfigured,
}

/// Relays client requests to the configured backend.
#[derive(Debug, Clone)]
pub struct ForwardingEngine {
    target: Arc<TargetConfig>,
    client: BackendClient,
}

impl ForwardingEngine {
    pub fn new(target: Arc<TargetConfig>, client: BackendClient) -> Self {
        Self { target, client }
    }

    /// Forward one client request to the backend.
    pub async fn forward(&self, request: Request) -> Result<Forwarded, ProxyError> {
        let summary = RequestSummary::of(&request);
        tracing::info!(
            peer = %summary.peer_display(),
            host = summary.host.as_deref().unwrap_or("-"),
            method = %summary.method,
            uri = %summary.uri,
            "Request received"
        );

        let Some(base_uri) = self.target.snapshot() else {
            tracing::debug!("No target configured, not forwarding");
            return Ok(Forwarded::NotConfigured);
        };

        let (parts, inbound_body) = request.into_parts();
        let uri = backend_uri(&base_uri, &parts.uri)?;

        let mut outbound = Request::new(inbound_body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = uri.clone();
        *outbound.headers_mut() = headers::to_backend(&parts.headers);

        let response = self
            .client
            .request(outbound)
            .await
            .map_err(ProxyError::from_transport)?;

        tracing::debug!(
            backend = %uri,
            status = response.status().as_u16(),
            "Backend responded"
        );

        Ok(Forwarded::Relayed(body::to_client(response)))
    }
}

/// Join the base URI and the request path+query.
///
/// The two are concatenated as text and parsed once; the path keeps its
/// exact bytes (dot segments, percent-escapes, reserved characters).
pub fn backend_uri(base_uri: &str, request_uri: &Uri) -> Result<Uri, ProxyError> {
    let path_and_query = request_uri
        .path_and_query()
        .map(PathAndQuery::as_str)
        .unwrap_or("/");
    let joined = format!("{base_uri}{path_and_query}");

    let uri: Uri = match joined.parse() {
        Ok(uri) => uri,
        Err(e) => return Err(invalid_target(joined, e)),
    };
    if uri.scheme() != Some(&Scheme::HTTP) {
        return Err(invalid_target(joined, "only http:// backends are supported"));
    }
    if uri.authority().is_none() {
        return Err(invalid_target(joined, "missing host"));
    }

    Ok(uri)
}

fn invalid_target(uri: String, reason: impl ToString) -> ProxyError {
    ProxyError::InvalidTargetUri {
        uri,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransportConfig;
    use crate::proxy::build_client;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    fn joined(base: &str, path: &str) -> String {
        backend_uri(base, &uri(path)).unwrap().to_string()
    }

    #[test]
    fn test_joins_path_and_query() {
        assert_eq!(joined("http://backend:9000", "/items?id=7"), "http://backend:9000/items?id=7");
    }

    #[test]
    fn test_keeps_encoded_octets() {
        assert_eq!(
            joined("http://backend:9000", "/a%20b/c%2Fd?q=x%26y"),
            "http://backend:9000/a%20b/c%2Fd?q=x%26y"
        );
    }

    #[test]
    fn test_dot_segments_are_not_resolved() {
        assert_eq!(joined("http://backend:9000", "/a/../b"), "http://backend:9000/a/../b");
        assert_eq!(joined("http://backend:9000", "/x/./y"), "http://backend:9000/x/./y");
    }

    #[test]
    fn test_encoded_dots_are_not_decoded() {
        assert_eq!(
            joined("http://backend:9000", "/a/%2e%2e/b"),
            "http://backend:9000/a/%2e%2e/b"
        );
    }

    #[test]
    fn test_reserved_characters_are_not_reencoded() {
        assert_eq!(joined("http://backend:9000", "/p{q}"), "http://backend:9000/p{q}");
    }

    #[test]
    fn test_base_authority_is_kept_verbatim() {
        let joined = backend_uri("http://Backend:80", &uri("/x")).unwrap();
        assert_eq!(joined.authority().unwrap().as_str(), "Backend:80");
        assert_eq!(joined.path(), "/x");
    }

    #[test]
    fn test_base_with_path_prefix() {
        assert_eq!(joined("http://backend:9000/app", "/items"), "http://backend:9000/app/items");
    }

    #[test]
    fn test_absolute_form_uses_path_only() {
        assert_eq!(
            joined("http://backend:9000", "http://proxy.example/x?y=1"),
            "http://backend:9000/x?y=1"
        );
    }

    #[test]
    fn test_invalid_base_fails() {
        let err = backend_uri("not a uri", &uri("/items")).unwrap_err();
        match err {
            ProxyError::InvalidTargetUri { uri, .. } => assert_eq!(uri, "not a uri/items"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_http_scheme_fails() {
        let err = backend_uri("ftp://backend:21", &uri("/file")).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidTargetUri { .. }));
    }

    #[tokio::test]
    async fn test_unset_target_sends_nothing() {
        let client = build_client(&TransportConfig::default());
        let engine = ForwardingEngine::new(Arc::new(TargetConfig::new()), client);
        let request = axum::http::Request::builder()
            .uri("/items")
            .body(axum::body::Body::empty())
            .unwrap();

        let outcome = engine.forward(request).await.unwrap();
        assert!(matches!(outcome, Forwarded::NotConfigured));
    }
}
