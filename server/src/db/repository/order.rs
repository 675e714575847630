//! Order Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Order, OrderStatus};
use crate::db::sequence::HumanIdGenerator;

const TABLE: &str = "orders";
const HUMAN_ID_FIELD: &str = "order_id";

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

    /// Create an order, assigning a fresh human ID. A unique-index rejection
    /// from a concurrent writer means the candidate was claimed between the
    /// pre-check and the write, so regenerate and retry.
    pub async fn create(
        &self,
        mut order: Order,
        generator: &HumanIdGenerator,
    ) -> RepoResult<Order> {
        loop {
            order.order_id = generator.generate(TABLE, HUMAN_ID_FIELD).await?;

            match self.try_create(order.clone()).await {
                Ok(created) => return Ok(created),
                Err(RepoError::Duplicate(_)) => {
                    tracing::debug!(
                        order_id = order.order_id,
                        "Order ID claimed concurrently, regenerating"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_create(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by its human-facing 6-digit id
    pub async fn find_by_order_id(&self, order_id: i64) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM orders WHERE order_id = $order_id LIMIT 1")
            .bind(("order_id", order_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Update only the status of the order with the given human id
    pub async fn update_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> RepoResult<Option<Order>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE orders SET status = $status WHERE order_id = $order_id RETURN AFTER")
            .bind(("status", status))
            .bind(("order_id", order_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }
}
