//! Statistics API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::orders::{OrderService, RevenueSummary};
use crate::utils::AppResult;

/// GET /api/admin/statistics - revenue rollup over served orders
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<RevenueSummary>> {
    let summary = OrderService::new(&state).revenue_summary().await?;
    Ok(Json(summary))
}
