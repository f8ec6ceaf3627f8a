//! Server Implementation
//!
//! HTTP server startup and router assembly.

use axum::{Router, middleware as axum_middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth::require_staff;
use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests build state themselves)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = build_app(&state).with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🍜 Wok server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await
            .map_err(|e| AppError::internal(format!("Server error: {e}")))
    }
}

/// All public routes: customer-facing API plus login
fn public_router() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::entry::router())
        .merge(api::auth::router())
        .merge(api::menu::router())
        .merge(api::categories::router())
        .merge(api::orders::router())
        .merge(api::announcements::router())
        .merge(api::sync::router())
}

/// All staff routes, gated behind the bearer-token middleware
fn admin_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api::menu::admin_router())
        .merge(api::categories::admin_router())
        .merge(api::orders::admin_router())
        .merge(api::announcements::admin_router())
        .merge(api::statistics::admin_router())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_staff,
        ))
}

/// Build a fully configured application with all middleware.
///
/// Used by the HTTP server and by integration tests via `tower::Service`.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    public_router()
        .merge(admin_router(state))
        // CORS - the LIFF frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
