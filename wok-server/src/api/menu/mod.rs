//! Menu API

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Public routes: customers browse the menu
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(handler::list))
}

/// Staff routes: menu management
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/menu", post(handler::create))
        .route(
            "/api/admin/menu/{id}",
            put(handler::update).delete(handler::delete),
        )
}
