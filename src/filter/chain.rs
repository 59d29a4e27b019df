//! Filter chain and its middleware.
//!
//! A request moves through `Received → Inspected → forwarded`. Filters only
//! ever see `&mut Request`; the chain, not the filter, hands the request to
//! the next stage, and `Inspected::forward` consumes both the request and
//! `Next`, so the next stage runs exactly once per request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::http::request::peer_addr;

/// A pre-forwarding stage.
///
/// Filters may read and rewrite the request (for example attach an
/// authenticated-subject header) but have no way to stop it.
pub trait RequestFilter: Send + Sync {
    /// Name used in log lines.
    fn name(&self) -> &'static str;

    /// Called once when the chain is built.
    fn init(&self) {}

    /// Inspect or annotate one request. `peer` is `None` when the connection
    /// did not record a peer address.
    fn inspect(&self, request: &mut Request, peer: Option<SocketAddr>);

    /// Called once when the chain is dropped.
    fn destroy(&self) {}
}

/// Ordered list of filters run before the forwarding engine.
pub struct FilterChain {
    filters: Vec<Arc<dyn RequestFilter>>,
}

impl FilterChain {
    pub fn new(filters: Vec<Arc<dyn RequestFilter>>) -> Self {
        for filter in &filters {
            filter.init();
        }
        Self { filters }
    }

    fn run(&self, request: &mut Request) {
        let peer = peer_addr(request);
        for filter in &self.filters {
            filter.inspect(request, peer);
        }
    }
}

impl Drop for FilterChain {
    fn drop(&mut self) {
        for filter in &self.filters {
            filter.destroy();
        }
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

/// A request that has not been through the chain yet.
pub struct Received(Request);

/// A request every filter has seen.
pub struct Inspected(Request);

impl Received {
    pub fn new(request: Request) -> Self {
        Self(request)
    }

    pub fn inspect(mut self, chain: &FilterChain) -> Inspected {
        chain.run(&mut self.0);
        Inspected(self.0)
    }
}

impl Inspected {
    pub fn request(&self) -> &Request {
        &self.0
    }

    pub async fn forward(self, next: Next) -> Response {
        next.run(self.0).await
    }
}

/// Axum middleware running `chain` in front of the wrapped handler.
pub async fn filter_middleware(
    State(chain): State<Arc<FilterChain>>,
    request: Request,
    next: Next,
) -> Response {
    Received::new(request).inspect(&chain).forward(next).await
}
