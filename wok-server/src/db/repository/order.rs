//! Order Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use shared::order::Order;

const TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::table($tb) ORDER BY created_at")
            .bind(("tb", TABLE))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Persist a new order under its pre-generated id
    pub async fn create(&self, order: &Order) -> RepoResult<Order> {
        let id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;
        self.put(&id, order, "CREATE").await
    }

    /// Replace an existing order document wholesale (last write wins)
    pub async fn save(&self, order: &Order) -> RepoResult<Order> {
        let id = order
            .id
            .clone()
            .ok_or_else(|| RepoError::Validation("Order has no id".to_string()))?;
        if self.find_by_id(&id).await?.is_none() {
            return Err(RepoError::NotFound(format!("Order {id} not found")));
        }
        self.put(&id, order, "UPSERT").await
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

    /// Best-effort bulk delete; returns how many documents were removed.
    /// A failure partway leaves the remainder in place.
    pub async fn delete_all(&self) -> RepoResult<usize> {
        let orders = self.find_all().await?;
        let mut deleted = 0usize;
        for order in &orders {
            if let Some(id) = &order.id {
                match self.delete(id).await {
                    Ok(true) => deleted += 1,
                    Ok(false) => {}
                    Err(e) => {
                        tracing::warn!(order_id = %id, error = %e, "Failed to delete order during clear");
                    }
                }
            }
        }
        Ok(deleted)
    }

    async fn put(&self, id: &str, order: &Order, verb: &str) -> RepoResult<Order> {
        let content = BaseRepository::content_of(order)?;
        let statement = format!("{verb} type::thing($tb, $id) CONTENT $data RETURN NONE");
        let saved: Vec<Order> = self
            .base
            .db()
            .query(statement)
            .query("SELECT *, record::id(id) AS id FROM type::thing($tb, $id)")
            .bind(("tb", TABLE))
            .bind(("id", id.to_string()))
            .bind(("data", content))
            .await?
            .take(1)?;
        saved
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to persist order".to_string()))
    }
}
