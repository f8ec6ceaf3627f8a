//! Database Module
//!
//! Embedded SurrealDB document store. Collections are schemaless; each
//! entity type is one table of top-level documents keyed by string ids.

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "wok";
const DATABASE: &str = "wok";

/// Database service — owns the embedded store handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk store under `data_dir`
    pub async fn open(data_dir: &str) -> Result<Self, AppError> {
        let path = format!("{data_dir}/wok.db");
        let db = Surreal::new::<RocksDb>(path.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::select_ns(&db).await?;
        tracing::info!(path = %path, "Database opened");
        Ok(Self { db })
    }

    /// In-memory store, used by tests
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::select_ns(&db).await?;
        Ok(Self { db })
    }

    async fn select_ns(db: &Surreal<Db>) -> Result<(), AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))
    }
}
