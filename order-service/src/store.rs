use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};
use inventory_service::DbPool;
use shared::{Order, OrderRepository, RepositoryError};
use tracing::info;
use uuid::Uuid;

use crate::models::*;
use crate::schema::*;

/// Orders and their line items kept in PostgreSQL.
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: DbPool,
}

impl PgOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn save(&self, mut order: Order) -> Result<Order, RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        if order.id.is_empty() {
            order.id = Uuid::new_v4().to_string();
        }

        let row = DbOrder::from(&order);
        let items = DbOrderItem::rows(&order);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            Box::pin(async move {
                diesel::insert_into(orders::table)
                    .values(&row)
                    .on_conflict(orders::id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .await?;

                diesel::delete(order_items::table.filter(order_items::order_id.eq(&row.id)))
                    .execute(conn)
                    .await?;

                if !items.is_empty() {
                    diesel::insert_into(order_items::table)
                        .values(&items)
                        .execute(conn)
                        .await?;
                }

                Ok(())
            })
        })
        .await?;

        info!(order_id = %order.id, status = %order.status, "Order saved");
        Ok(order)
    }

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;

        let row = orders::table
            .filter(orders::id.eq(order_id))
            .first::<DbOrder>(&mut conn)
            .await
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::position.asc())
            .load::<DbOrderItem>(&mut conn)
            .await?;

        row.into_order(items).map(Some)
    }
}
