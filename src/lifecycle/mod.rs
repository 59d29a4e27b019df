//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging → Activate target → Listen
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     Shutdown::trigger or SIGTERM/SIGINT
//!     → Stop accepting → Drain in-flight requests → Deactivate target
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{shutdown_requested, Shutdown};
pub use signals::shutdown_signal;
