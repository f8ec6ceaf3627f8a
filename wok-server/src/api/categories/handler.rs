//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::{Category, CategoryCreate};

use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, MenuItemRepository};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "categories";

/// GET /api/categories - categories ordered for display.
pub async fn list(State(state): State<ServerState>) -> Json<Vec<Category>> {
    let repo = CategoryRepository::new(state.get_db());
    let categories = repo.find_all().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Category read failed, serving empty list");
        Vec::new()
    });
    Json(categories)
}

/// POST /api/admin/categories - create a category (names are unique)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    payload.validate()?;

    let repo = CategoryRepository::new(state.get_db());
    let category = repo.create(payload).await?;

    state.broadcast_sync(RESOURCE, "created").await;
    Ok(Json(category))
}

/// DELETE /api/admin/categories/{id} - delete a category.
///
/// Refused while any menu item still references it; the error carries
/// the referencing item count so the console can explain the refusal.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CategoryRepository::new(state.get_db());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;

    let in_use = MenuItemRepository::new(state.get_db())
        .count_by_category(&category.name)
        .await?;
    if in_use > 0 {
        return Err(AppError::CategoryInUse {
            category: category.name,
            count: in_use,
        });
    }

    repo.delete(&id).await?;
    state.broadcast_sync(RESOURCE, "deleted").await;
    Ok(Json(true))
}
