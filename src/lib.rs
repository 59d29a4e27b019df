//! Single-target HTTP reverse proxy with a pre-forwarding filter hook.
//!
//! Every inbound request passes the filter chain and is then forwarded,
//! method, path, headers and body intact, to one configured backend. The
//! backend's answer, redirects included, is relayed back verbatim.

pub mod config;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use config::TargetConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
