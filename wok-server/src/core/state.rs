use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::message::SyncEvent;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{
    AnnouncementRepository, CategoryRepository, MenuItemRepository, OrderRepository,
};
use crate::services::{NotifyService, SyncBus};
use crate::utils::AppError;

/// Resource version manager
///
/// Lock-free per-resource version counters. `broadcast_sync` stamps every
/// snapshot with an increasing version so clients can discard stale
/// events.
#[derive(Debug, Default)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the version for `resource` and return the new value
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Current version for `resource`, 0 when never published
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

/// Server state — shared handles to every service
///
/// Cheaply cloneable; handlers receive it via axum `State`.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    /// Embedded document store
    pub db: Surreal<Db>,
    /// Change broadcast bus (full collection snapshots)
    pub sync: SyncBus,
    /// Outbound chat push
    pub notify: NotifyService,
    /// Staff session tokens
    pub jwt: Arc<JwtService>,
    /// Per-resource version counters for broadcast_sync
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// Initialize state against the on-disk store
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.data_dir)
            .map_err(|e| AppError::internal(format!("Failed to create data dir: {e}")))?;
        let db_service = DbService::open(&config.data_dir).await?;
        Ok(Self::assemble(config, db_service))
    }

    /// State over an in-memory store; used by tests
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::memory().await?;
        Ok(Self::assemble(config, db_service))
    }

    fn assemble(config: &Config, db_service: DbService) -> Self {
        Self {
            config: config.clone(),
            db: db_service.db,
            sync: SyncBus::new(),
            notify: NotifyService::new(config),
            jwt: Arc::new(JwtService::new(config.jwt.clone())),
            resource_versions: Arc::new(ResourceVersions::new()),
        }
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Publish a change notification for `resource`.
    ///
    /// Loads the full current snapshot of the collection and broadcasts it
    /// with a fresh version (the subscription contract is full snapshots,
    /// not diffs). A failed snapshot read is logged and the publish is
    /// skipped, leaving subscribers on their last-known-good state.
    ///
    /// # Arguments
    /// - `resource`: "menu" | "orders" | "categories" | "announcements"
    /// - `action`: "created" | "updated" | "deleted" | "cleared"
    pub async fn broadcast_sync(&self, resource: &str, action: &str) {
        let snapshot = match self.collection_snapshot(resource).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(resource, action, error = %e, "Snapshot read failed, sync skipped");
                return;
            }
        };

        let version = self.resource_versions.increment(resource);
        self.sync
            .publish(SyncEvent::new(resource, version, action, snapshot));
    }

    /// Full current snapshot of one collection as JSON
    pub async fn collection_snapshot(&self, resource: &str) -> Result<serde_json::Value, AppError> {
        let db = self.get_db();
        let value = match resource {
            "menu" => serde_json::to_value(MenuItemRepository::new(db).find_all().await?),
            "orders" => serde_json::to_value(OrderRepository::new(db).find_all().await?),
            "categories" => serde_json::to_value(CategoryRepository::new(db).find_all().await?),
            "announcements" => {
                serde_json::to_value(AnnouncementRepository::new(db).find_all().await?)
            }
            other => {
                return Err(AppError::internal(format!("Unknown sync resource: {other}")));
            }
        };
        value.map_err(|e| AppError::internal(format!("Snapshot serialization failed: {e}")))
    }
}
