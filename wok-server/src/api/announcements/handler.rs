//! Announcement API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate, active_announcement};

use crate::core::ServerState;
use crate::db::repository::AnnouncementRepository;
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "announcements";

/// GET /api/announcements/active - the announcement customers see.
///
/// Several announcements may be flagged active; the most recently
/// updated one wins. `null` when nothing is active.
pub async fn active(State(state): State<ServerState>) -> Json<Option<Announcement>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let announcements = repo.find_all().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Announcement read failed");
        Vec::new()
    });
    Json(active_announcement(&announcements).cloned())
}

/// GET /api/admin/announcements - all announcements, newest update first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Announcement>>> {
    let repo = AnnouncementRepository::new(state.get_db());
    Ok(Json(repo.find_all().await?))
}

/// POST /api/admin/announcements
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AnnouncementCreate>,
) -> AppResult<Json<Announcement>> {
    payload.validate()?;

    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.create(payload).await?;

    state.broadcast_sync(RESOURCE, "created").await;
    Ok(Json(announcement))
}

/// PUT /api/admin/announcements/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AnnouncementUpdate>,
) -> AppResult<Json<Announcement>> {
    payload.validate()?;

    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.update(&id, payload).await?;

    state.broadcast_sync(RESOURCE, "updated").await;
    Ok(Json(announcement))
}

/// POST /api/admin/announcements/{id}/toggle - flip the active flag
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Announcement>> {
    let repo = AnnouncementRepository::new(state.get_db());
    let announcement = repo.toggle_active(&id).await?;

    state.broadcast_sync(RESOURCE, "updated").await;
    Ok(Json(announcement))
}

/// DELETE /api/admin/announcements/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = AnnouncementRepository::new(state.get_db());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("Announcement {id} not found")));
    }

    state.broadcast_sync(RESOURCE, "deleted").await;
    Ok(Json(true))
}
