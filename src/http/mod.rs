//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info)
//!     → TraceLayer span
//!     → filter chain (crate::filter)
//!     → proxy handler → forwarding engine (crate::proxy)
//!     → response.rs (status page / failure mapping when nothing was relayed)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{peer_addr, RequestSummary};
pub use server::{AppState, HttpServer};
