//! Announcement Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};

const TABLE: &str = "announcements";

#[derive(Clone)]
pub struct AnnouncementRepository {
    base: BaseRepository,
}

impl AnnouncementRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All announcements, most recently updated first
    pub async fn find_all(&self) -> RepoResult<Vec<Announcement>> {
        let announcements: Vec<Announcement> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::table($tb) ORDER BY updated_at DESC")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(announcements)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Announcement>> {
        let announcements: Vec<Announcement> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(announcements.into_iter().next())
    }

    pub async fn create(&self, data: AnnouncementCreate) -> RepoResult<Announcement> {
        let now = Utc::now();
        let announcement = Announcement {
            id: None,
            title: data.title,
            content: data.content,
            is_active: data.is_active.unwrap_or(true),
            created_at: Some(now),
            updated_at: Some(now),
        };

        let id = Uuid::new_v4().to_string();
        self.put(&id, &announcement).await
    }

    pub async fn update(&self, id: &str, data: AnnouncementUpdate) -> RepoResult<Announcement> {
        let mut announcement = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Announcement {id} not found")))?;

        if let Some(title) = data.title {
            announcement.title = title;
        }
        if let Some(content) = data.content {
            announcement.content = content;
        }
        if let Some(is_active) = data.is_active {
            announcement.is_active = is_active;
        }
        announcement.updated_at = Some(Utc::now());

        self.put(id, &announcement).await
    }

    /// Flip the active flag; the update timestamp makes the newly toggled
    /// announcement win the active tie-break
    pub async fn toggle_active(&self, id: &str) -> RepoResult<Announcement> {
        let active = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Announcement {id} not found")))?
            .is_active;
        self.update(
            id,
            AnnouncementUpdate {
                title: None,
                content: None,
                is_active: Some(!active),
            },
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        self.base
            .db()
            .query("DELETE type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(true)
    }

    async fn put(&self, id: &str, announcement: &Announcement) -> RepoResult<Announcement> {
        let content = BaseRepository::content_of(announcement)?;
        let saved: Vec<Announcement> = self
            .base
            .db()
            .query("UPSERT type::thing($tb, $id) CONTENT $data RETURN NONE")
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", content))
            .await?
            .take(1)?;
        saved
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to persist announcement".to_string()))
    }
}
