//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use shared::order::{Order, OrderStatus};

use crate::core::ServerState;
use crate::orders::{LineRemoval, OrderDraftLine, OrderService};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "orders";

#[derive(Debug, Deserialize)]
pub struct SubmitOrderRequest {
    pub table_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    pub lines: Vec<OrderDraftLine>,
}

#[derive(Debug, Deserialize)]
pub struct ManualOrderRequest {
    pub table_id: String,
    pub lines: Vec<OrderDraftLine>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClearQuery {
    #[serde(default)]
    pub confirm: bool,
}

/// POST /api/orders - customer order submission
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<SubmitOrderRequest>,
) -> AppResult<Json<Order>> {
    let service = OrderService::new(&state);
    let order = service
        .submit(&payload.table_id, payload.lines, payload.customer_id)
        .await?;

    state.broadcast_sync(RESOURCE, "created").await;
    Ok(Json(order))
}

/// GET /api/orders/{id} - customer order status
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state).get(&id).await?;
    Ok(Json(order))
}

/// GET /api/admin/orders?view=active|history|all - staff order board
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let service = OrderService::new(&state);
    let orders = match query.view.as_deref() {
        None | Some("active") => service.list_active().await?,
        Some("history") => service.list_history().await?,
        Some("all") => service.list_all().await?,
        Some(other) => {
            return Err(AppError::validation(format!("Unknown view: {other}")));
        }
    };
    Ok(Json(orders))
}

/// POST /api/admin/orders/manual - staff-created order (phone orders,
/// walk-ins). No chat push.
pub async fn create_manual(
    State(state): State<ServerState>,
    Json(payload): Json<ManualOrderRequest>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state)
        .create_manual(&payload.table_id, payload.lines)
        .await?;

    state.broadcast_sync(RESOURCE, "created").await;
    Ok(Json(order))
}

/// PUT /api/admin/orders/{id}/status - advance the order lifecycle
pub async fn advance_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> AppResult<Json<Order>> {
    let order = OrderService::new(&state)
        .advance_status(&id, payload.status)
        .await?;

    state.broadcast_sync(RESOURCE, "updated").await;
    Ok(Json(order))
}

/// DELETE /api/admin/orders/{id}/lines/{index} - remove one line.
///
/// Removing the last line does not delete the order; the response tells
/// the console to confirm a whole-order deletion instead.
pub async fn delete_line(
    State(state): State<ServerState>,
    Path((id, index)): Path<(String, usize)>,
) -> AppResult<Json<LineRemoval>> {
    let outcome = OrderService::new(&state).delete_line(&id, index).await?;

    if matches!(outcome, LineRemoval::Updated { .. }) {
        state.broadcast_sync(RESOURCE, "updated").await;
    }
    Ok(Json(outcome))
}

/// DELETE /api/admin/orders/{id} - delete a whole order
pub async fn delete_order(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    OrderService::new(&state).delete_order(&id).await?;

    state.broadcast_sync(RESOURCE, "deleted").await;
    Ok(Json(true))
}

/// DELETE /api/admin/orders?confirm=true - end-of-day reset
pub async fn clear_all(
    State(state): State<ServerState>,
    Query(query): Query<ClearQuery>,
) -> AppResult<Json<Value>> {
    if !query.confirm {
        return Err(AppError::validation(
            "Clearing all orders requires confirm=true",
        ));
    }

    let deleted = OrderService::new(&state).clear_all().await?;
    state.broadcast_sync(RESOURCE, "cleared").await;
    Ok(Json(json!({ "deleted": deleted })))
}
