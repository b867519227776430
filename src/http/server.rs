//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit, panic catching, CORS)
//! - Serve the static chat page
//! - Bind server to listener and stop on shutdown signal

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::downstream::{BackendError, ChatBackend, RasaClient};
use crate::gateway::Gateway;
use crate::http::{request, response};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub backend_url: String,
}

/// HTTP server for the chat gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a server that forwards to the configured Rasa webhook.
    pub fn new(config: GatewayConfig) -> Result<Self, BackendError> {
        let backend = Arc::new(RasaClient::new(&config.backend)?);
        Ok(Self::with_backend(config, backend))
    }

    /// Create a server around any backend implementation.
    pub fn with_backend(config: GatewayConfig, backend: Arc<dyn ChatBackend>) -> Self {
        let gateway = Gateway::new(backend, config.backend.timeout());
        let router = Self::build_router(&config, AppState { gateway });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/webhook", post(webhook_handler))
            .route("/health", get(health_handler));

        if config.static_files.enabled {
            router = router.route_service("/", ServeFile::new(&config.static_files.index_path));
        }

        let router = router
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.listener.max_body_size))
            .layer(CatchPanicLayer::custom(response::panic_response))
            .layer(TraceLayer::new_for_http().make_span_with(request::make_request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        if config.cors.enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend_url = %self.config.backend.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// `POST /webhook`: forward a chat message and return the envelope.
async fn webhook_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let (status, envelope) = match body {
        Ok(bytes) => state.gateway.handle(&bytes).await,
        Err(rejection) => state.gateway.reject(&rejection.body_text()),
    };
    (status, Json(envelope))
}

/// `GET /health`: liveness and the backend the gateway points at.
async fn health_handler(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend_url: state.gateway.backend_url().to_string(),
    })
}
