use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::order::Order;

/// Stock levels per product.
///
/// Each call is expected to be atomic on its own; callers hold no locks
/// across calls.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Available quantity for `product_id`. Unknown products have no stock.
    async fn get_stock(&self, product_id: &str) -> Result<i32, RepositoryError>;

    /// Takes `quantity` units out of the available stock. Returns `false`
    /// and leaves the stock untouched when not enough units are available.
    async fn reserve_stock(&self, product_id: &str, quantity: i32) -> Result<bool, RepositoryError>;

    /// Puts `quantity` previously reserved units back.
    async fn release_stock(&self, product_id: &str, quantity: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts or updates `order` and returns the stored record.
    async fn save(&self, order: Order) -> Result<Order, RepositoryError>;

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError>;
}
