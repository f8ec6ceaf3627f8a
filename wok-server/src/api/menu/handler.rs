//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, sorted_for_display};

use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, MenuItemRepository};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "menu";

/// GET /api/menu - full menu, unavailable items included (visible but
/// not orderable), sorted by category display order then item name.
/// Read failures degrade to an empty menu rather than crashing the
/// customer view.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<MenuItem>> {
    let repo = MenuItemRepository::new(state.get_db());
    let items = repo.find_all().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Menu read failed, serving empty menu");
        Vec::new()
    });
    let categories = CategoryRepository::new(state.get_db())
        .find_all()
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Category read failed, keeping store order");
            Vec::new()
        });
    Json(sorted_for_display(items, &categories))
}

/// POST /api/admin/menu - create a menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    ensure_category_exists(&state, &payload.category).await?;

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.create(payload).await?;

    state.broadcast_sync(RESOURCE, "created").await;
    Ok(Json(item))
}

/// PUT /api/admin/menu/{id} - update a menu item
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    payload.validate()?;
    if let Some(category) = &payload.category {
        ensure_category_exists(&state, category).await?;
    }

    let repo = MenuItemRepository::new(state.get_db());
    let item = repo.update(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated").await;
    Ok(Json(item))
}

/// DELETE /api/admin/menu/{id} - delete a menu item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MenuItemRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }

    state.broadcast_sync(RESOURCE, "deleted").await;
    Ok(Json(true))
}

/// Menu items reference categories by name; reject references to
/// categories that do not exist instead of scattering loose strings.
async fn ensure_category_exists(state: &ServerState, name: &str) -> AppResult<()> {
    let repo = CategoryRepository::new(state.get_db());
    if repo.find_by_name(name).await?.is_none() {
        return Err(AppError::validation(format!("Unknown category: {name}")));
    }
    Ok(())
}
