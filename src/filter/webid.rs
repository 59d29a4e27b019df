//! WebID authentication filter.
//!
//! Sits in front of the forwarding engine for every request. Identity
//! verification is not performed yet: the filter records each request and
//! passes it on untouched. Requests it cannot fully describe (no peer
//! address, no Host header) are passed on as well.

use std::net::SocketAddr;

use axum::extract::Request;
use axum::http::header::HOST;

use crate::filter::chain::RequestFilter;

#[derive(Debug, Default)]
pub struct WebIdFilter;

impl WebIdFilter {
    pub fn new() -> Self {
        Self
    }
}

impl RequestFilter for WebIdFilter {
    fn name(&self) -> &'static str {
        "webid"
    }

    fn init(&self) {
        tracing::info!(filter = self.name(), "Filter initialized");
    }

    fn inspect(&self, request: &mut Request, peer: Option<SocketAddr>) {
        let host = request.headers().get(HOST).and_then(|h| h.to_str().ok());
        let message = match (peer, host) {
            (Some(_), Some(_)) => "Filtering request",
            _ => "Passing unclassified request",
        };

        tracing::info!(
            peer = %peer.map(|p| p.to_string()).unwrap_or_else(|| "-".into()),
            host = %host.unwrap_or("-"),
            method = %request.method(),
            uri = %request.uri(),
            "{message}"
        );
    }

    fn destroy(&self) {
        tracing::info!(filter = self.name(), "Filter destroyed");
    }
}
