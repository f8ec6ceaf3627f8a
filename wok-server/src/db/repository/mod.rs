//! Repository Module
//!
//! CRUD over the embedded document store, one repository per collection.
//!
//! # ID convention
//!
//! Record keys are plain strings (UUIDs). Queries project the key back
//! into the document's `id` field with `record::id(id) AS id`, so model
//! structs carry `Option<String>` ids and never see the engine's record
//! id type.

pub mod announcement;
pub mod category;
pub mod menu_item;
pub mod order;

// Re-exports
pub use announcement::AnnouncementRepository;
pub use category::CategoryRepository;
pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Serialize an entity for CONTENT binding, dropping its `id` field
    /// (the record key carries identity; a mismatching inline id is a
    /// store error).
    pub fn content_of<T: Serialize>(entity: &T) -> RepoResult<serde_json::Value> {
        let mut value = serde_json::to_value(entity)
            .map_err(|e| RepoError::Database(format!("Serialization failed: {e}")))?;
        if let Some(obj) = value.as_object_mut() {
            obj.remove("id");
        }
        Ok(value)
    }
}
