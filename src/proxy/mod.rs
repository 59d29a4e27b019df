//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Request (after filters)
//!     → engine.rs (snapshot target, log receipt)
//!     → headers.rs (client → backend copy)
//!     → client body handed to the transport as a stream
//!     → transport.rs (shared client, redirects never followed)
//!     → body.rs + headers.rs (status, merged headers, streamed body)
//!     → Response to client
//! ```

pub mod body;
pub mod engine;
pub mod error;
pub mod headers;
pub mod transport;

pub use engine::{backend_uri, Forwarded, ForwardingEngine};
pub use error::ProxyError;
pub use transport::{build_client, BackendClient};
