mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Public announcement routes.
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/announcements/active", get(handler::active))
}

/// Staff-only announcement routes.
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/announcements",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/admin/announcements/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route(
            "/api/admin/announcements/{id}/toggle",
            post(handler::toggle),
        )
}
