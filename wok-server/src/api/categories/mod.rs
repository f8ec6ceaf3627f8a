mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Public category routes.
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/categories", get(handler::list))
}

/// Staff-only category routes.
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/categories", post(handler::create))
        .route("/api/admin/categories/{id}", delete(handler::delete))
}
