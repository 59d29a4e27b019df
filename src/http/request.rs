//! Request inspection helpers.
//!
//! # Responsibilities
//! - Extract the peer address recorded by the listener
//! - Describe a request (peer, host, method, uri) for log lines
//!
//! # Design Decisions
//! - A request without a recorded peer (e.g. driven through a `Router`
//!   directly) is still describable; the peer is simply unknown

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::{header::HOST, Method, Uri};

/// Peer address of the client connection, when the server recorded one.
pub fn peer_addr(request: &Request) -> Option<SocketAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// The parts of a request that get logged on receipt.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    pub peer: Option<SocketAddr>,
    pub host: Option<String>,
    pub method: Method,
    pub uri: Uri,
}

impl RequestSummary {
    pub fn of(request: &Request) -> Self {
        Self {
            peer: peer_addr(request),
            host: request
                .headers()
                .get(HOST)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned),
            method: request.method().clone(),
            uri: request.uri().clone(),
        }
    }

    /// `ip:port`, or `unknown`.
    pub fn peer_display(&self) -> String {
        self.peer
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
