mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Public auth routes.
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/auth/login", post(handler::login))
}
