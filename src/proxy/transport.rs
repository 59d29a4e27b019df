//! Outbound HTTP transport.
//!
//! One client is shared by every in-flight request; it pools connections
//! internally and needs no external locking.
//!
//! The client sends each request exactly as built: it never follows
//! redirects, never consults a system proxy and never rewrites the request
//! target, so a 3xx from the backend is relayed like any other response.

use std::time::Duration;

use axum::body::Body;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TransportConfig;

/// Client used to reach the backend.
pub type BackendClient = Client<HttpConnector, Body>;

/// Build the client used to reach the backend.
pub fn build_client(config: &TransportConfig) -> BackendClient {
    let mut connector = HttpConnector::new();
    connector.set_connect_timeout(config.connect_timeout_secs.map(Duration::from_secs));

    Client::builder(TokioExecutor::new()).build(connector)
}
