mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Staff-only statistics routes.
pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/statistics", get(handler::summary))
}
