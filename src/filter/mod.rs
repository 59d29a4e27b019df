//! Pre-forwarding filter subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → chain.rs (filter_middleware: Received)
//!     → each RequestFilter::inspect, in order (Inspected)
//!     → next stage (forwarding engine), exactly once
//! ```
//!
//! # Design Decisions
//! - Filters never terminate the chain; rejection policy lives elsewhere
//! - Filters may annotate the request, e.g. add an identity header,
//!   which the engine forwards unchanged
//! - Requests that cannot be classified are passed on, never dropped

pub mod chain;
pub mod webid;

pub use chain::{filter_middleware, FilterChain, Inspected, Received, RequestFilter};
pub use webid::WebIdFilter;
