//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the validation endpoint
//! - Wire up middleware (request ID, capture, timeout, body limit)
//! - Serve on a bound listener until shutdown

use axum::{extract::DefaultBodyLimit, middleware, routing::any, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::config::ServiceConfig;
use crate::http::handler::{not_found, validate_receipt};
use crate::http::request::MakeRequestUuid;
use crate::observability::capture_exchange;
use crate::receipt::ReceiptValidator;

/// The only routed path.
pub const VALIDATE_PATH: &str = "/receipt/validate";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<ReceiptValidator>,
}

/// HTTP server for the validator.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            validator: Arc::new(ReceiptValidator::new()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request ID is set before the
    /// capture logs the entry line, and timeout responses are captured
    /// like handler responses. `DefaultBodyLimit` only bounds reads, so
    /// the handler can reject the method before touching the body.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(VALIDATE_PATH, any(validate_receipt))
            .fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.limits.request_timeout_secs,
            )))
            .layer(middleware::from_fn(capture_exchange))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A handle to the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires and in-flight requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_body_bytes = self.config.limits.max_body_bytes,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
