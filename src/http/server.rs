//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: every path and method goes to the proxy handler
//! - Wire up middleware (tracing, filter chain)
//! - Activate the backend target from configuration
//! - Apply configuration updates while serving
//! - Serve until shutdown, then deactivate the target

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::trace::TraceLayer;

use crate::config::{ProxyConfig, TargetConfig};
use crate::filter::{filter_middleware, FilterChain, RequestFilter, WebIdFilter};
use crate::http::response::not_configured;
use crate::lifecycle::{shutdown_requested, shutdown_signal};
use crate::proxy::{build_client, Forwarded, ForwardingEngine};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ForwardingEngine>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    target: Arc<TargetConfig>,
}

impl HttpServer {
    /// Create a server with the default filter chain (WebID filter).
    pub fn new(config: ProxyConfig) -> Self {
        Self::with_filters(config, vec![Arc::new(WebIdFilter::new())])
    }

    /// Create a server running `filters`, in order, before forwarding.
    pub fn with_filters(config: ProxyConfig, filters: Vec<Arc<dyn RequestFilter>>) -> Self {
        let client = build_client(&config.transport);

        let target = Arc::new(TargetConfig::new());
        target.activate(config.target.as_ref());

        let engine = Arc::new(ForwardingEngine::new(target.clone(), client));
        let chain = Arc::new(FilterChain::new(filters));

        let router = Self::build_router(AppState { engine }, chain);
        Self { router, target }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, chain: Arc<FilterChain>) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(chain, filter_middleware))
            .layer(TraceLayer::new_for_http())
    }

    /// Shared handle to the backend target, for external reconfiguration.
    pub fn target(&self) -> Arc<TargetConfig> {
        self.target.clone()
    }

    /// Serve on `listener` until `shutdown` fires or the process is signalled.
    ///
    /// Every configuration received on `config_updates` replaces the backend
    /// target.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ProxyConfig>,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let Self { router, target } = self;

        let reload_target = target.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                reload_target.modified(config.target.as_ref());
            }
        });

        let app = router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_requested(shutdown) => {}
                    _ = shutdown_signal() => {}
                }
            })
            .await?;

        reloader.abort();
        target.deactivate();

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler: forwards every request to the configured backend.
async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    match state.engine.forward(request).await {
        Ok(Forwarded::Relayed(response)) => response,
        Ok(Forwarded::NotConfigured) => not_configured(),
        Err(e) => e.into_response(),
    }
}
