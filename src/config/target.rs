//! Backend target cell.
//!
//! Holds the single backend base URI the proxy forwards to. The value is
//! swapped atomically on (re)configuration; the forwarding engine takes one
//! snapshot per request, so a request that started against one target
//! finishes against it even if the target changes meanwhile.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::schema::{TargetProperties, PROPERTY_TARGET_BASE_URI};

/// Process-wide backend base URI, or unset.
#[derive(Debug, Default)]
pub struct TargetConfig {
    base_uri: ArcSwapOption<String>,
}

impl TargetConfig {
    /// Create an unset target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active target. `None` clears it and makes the proxy inert.
    ///
    /// No reachability or syntax check happens here.
    pub fn configure(&self, base_uri: Option<String>) {
        self.base_uri.store(base_uri.map(Arc::new));
    }

    /// The target as of now. Callers keep the returned value for the whole
    /// request.
    pub fn snapshot(&self) -> Option<Arc<String>> {
        self.base_uri.load_full()
    }

    /// Whether a target is currently set.
    pub fn is_configured(&self) -> bool {
        self.base_uri.load().is_some()
    }

    /// Apply configuration properties on service start.
    pub fn activate(&self, properties: Option<&TargetProperties>) {
        self.apply(properties);
        tracing::info!("Service configured");
    }

    /// Apply changed configuration properties.
    pub fn modified(&self, properties: Option<&TargetProperties>) {
        self.apply(properties);
        tracing::info!("Configuration modified");
    }

    /// Clear the target on service stop.
    pub fn deactivate(&self) {
        self.apply(None);
        tracing::info!("Service deconfigured");
    }

    fn apply(&self, properties: Option<&TargetProperties>) {
        let Some(properties) = properties else {
            self.configure(None);
            return;
        };

        tracing::info!("Configuring service...");
        match &properties.target_base_uri {
            Some(uri) => {
                self.configure(Some(uri.clone()));
                tracing::info!(base_uri = %uri, "Proxy enabled");
            }
            None => {
                self.configure(None);
                tracing::info!(key = PROPERTY_TARGET_BASE_URI, "Proxy disabled, no target given");
            }
        }
    }
}
