//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig
//!     → target.rs (TargetConfig::activate)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server applies [target] via TargetConfig::modified
//!     → atomic swap of the backend base URI
//! ```
//!
//! # Design Decisions
//! - Only the backend target is reconfigurable at runtime
//! - All fields have defaults to allow minimal configs
//! - The target lives in an owned cell injected into the engine,
//!   not in a global

pub mod loader;
pub mod schema;
pub mod target;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfig, TargetProperties,
    TransportConfig, PROPERTY_TARGET_BASE_URI,
};
pub use target::TargetConfig;
pub use watcher::ConfigWatcher;
