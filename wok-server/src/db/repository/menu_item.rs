//! Menu Item Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, validate_option_groups};

const TABLE: &str = "menu";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All menu items in a stable base order (category name, item name);
    /// display ordering by `Category.display_order` is applied by the
    /// menu listing, which joins against the categories collection
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::table($tb) ORDER BY category, name")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(items.into_iter().next())
    }

    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let option_groups = data.option_groups.unwrap_or_default();
        validate_option_groups(&option_groups).map_err(RepoError::Validation)?;

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            image_url: data.image_url.unwrap_or_default(),
            available: data.available.unwrap_or(true),
            option_groups,
        };

        let id = Uuid::new_v4().to_string();
        self.put(&id, &item).await
    }

    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let mut item = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))?;

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(description) = data.description {
            item.description = Some(description);
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if let Some(category) = data.category {
            item.category = category;
        }
        if let Some(image_url) = data.image_url {
            item.image_url = image_url;
        }
        if let Some(available) = data.available {
            item.available = available;
        }
        if let Some(option_groups) = data.option_groups {
            validate_option_groups(&option_groups).map_err(RepoError::Validation)?;
            item.option_groups = option_groups;
        }

        self.put(id, &item).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let existing = self.find_by_id(id).await?;
        if existing.is_none() {
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

    /// Number of menu items referencing `category_name`; drives the
    /// category referential-integrity check
    pub async fn count_by_category(&self, category_name: &str) -> RepoResult<usize> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM type::table($tb) WHERE category = $name GROUP ALL")
            .bind(("tb", TABLE))
            .bind(("name", category_name.to_string()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }

    /// Upsert the full document under `id` and read it back
    async fn put(&self, id: &str, item: &MenuItem) -> RepoResult<MenuItem> {
        let content = BaseRepository::content_of(item)?;
        let created: Vec<MenuItem> = self
            .base
            .db()
            .query("UPSERT type::thing($tb, $id) CONTENT $data RETURN NONE")
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", content))
            .await?
            .take(1)?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to persist menu item".to_string()))
    }
}
