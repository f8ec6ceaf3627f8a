//! Category Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Category, CategoryCreate};

const TABLE: &str = "categories";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories ordered by display order then name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::table($tb) ORDER BY display_order, name")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::table($tb) WHERE name = $name LIMIT 1")
            .bind(("tb", TABLE))
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(categories.into_iter().next())
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        // Duplicate names would make the name-based menu reference ambiguous
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let category = Category {
            id: None,
            name: data.name,
            display_order: data.display_order.unwrap_or(0),
            created_at: Some(Utc::now()),
        };

        let id = Uuid::new_v4().to_string();
        let content = BaseRepository::content_of(&category)?;
        let created: Vec<Category> = self
            .base
            .db()
            .query("CREATE type::thing($tb, $id) CONTENT $data RETURN NONE")
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id))
            .bind(("data", content))
            .await?
            .take(1)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
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
}
