mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

/// Public order routes (customer-facing).
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", post(handler::submit))
        .route("/api/orders/{id}", get(handler::get))
}

/// Staff-only order routes.
pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/admin/orders",
            get(handler::list).delete(handler::clear_all),
        )
        .route("/api/admin/orders/manual", post(handler::create_manual))
        .route("/api/admin/orders/{id}/status", put(handler::advance_status))
        .route(
            "/api/admin/orders/{id}/lines/{index}",
            delete(handler::delete_line),
        )
        .route("/api/admin/orders/{id}", delete(handler::delete_order))
}
