use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use shared::{InventoryRepository, RepositoryError};
use tracing::warn;

use crate::models::*;
use crate::schema::*;

pub type DbPool = bb8::Pool<AsyncDieselConnectionManager<AsyncPgConnection>>;
type DbConnection<'a> = bb8::PooledConnection<'a, AsyncDieselConnectionManager<AsyncPgConnection>>;

/// Stock levels kept in the `inventory` table.
#[derive(Clone)]
pub struct PgInventoryRepository {
    pool: DbPool,
}

impl PgInventoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn conn(&self) -> Result<DbConnection<'_>, RepositoryError> {
        self.pool
            .get()
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }

    pub async fn find(&self, product_id: &str) -> Result<Option<Inventory>, RepositoryError> {
        let mut conn = self.conn().await?;

        let item = inventory::table
            .filter(inventory::product_id.eq(product_id))
            .first::<Inventory>(&mut conn)
            .await
            .optional()?;
        Ok(item)
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn get_stock(&self, product_id: &str) -> Result<i32, RepositoryError> {
        Ok(self
            .find(product_id)
            .await?
            .map(|item| item.available_quantity)
            .unwrap_or(0))
    }

    async fn reserve_stock(&self, product_id: &str, quantity: i32) -> Result<bool, RepositoryError> {
        let mut conn = self.conn().await?;

        // Guarded by the WHERE clause so concurrent reservations never oversell.
        let updated = diesel::update(
            inventory::table
                .filter(inventory::product_id.eq(product_id))
                .filter(inventory::available_quantity.ge(quantity)),
        )
        .set((
            inventory::available_quantity.eq(inventory::available_quantity - quantity),
            inventory::reserved_quantity.eq(inventory::reserved_quantity + quantity),
            inventory::updated_at.eq(Utc::now()),
        ))
        .execute(&mut conn)
        .await?;

        Ok(updated == 1)
    }

    async fn release_stock(&self, product_id: &str, quantity: i32) -> Result<(), RepositoryError> {
        let mut conn = self.conn().await?;

        let updated = diesel::update(inventory::table.filter(inventory::product_id.eq(product_id)))
            .set((
                inventory::available_quantity.eq(inventory::available_quantity + quantity),
                inventory::reserved_quantity.eq(inventory::reserved_quantity - quantity),
                inventory::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
            .await?;

        if updated == 0 {
            warn!(product_id, quantity, "Released stock for unknown product");
        }
        Ok(())
    }
}
