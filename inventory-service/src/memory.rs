use async_trait::async_trait;
use shared::{InventoryRepository, RepositoryError};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::warn;

/// Process-local stock levels, for development runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    stock: Mutex<HashMap<String, i32>>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let stock = levels.into_iter().map(|(id, qty)| (id.into(), qty)).collect();
        Self {
            stock: Mutex::new(stock),
        }
    }

    /// Adds `quantity` available units, creating the product if needed.
    pub async fn restock(&self, product_id: &str, quantity: i32) -> Result<(), RepositoryError> {
        let mut stock = self.stock.lock().await;
        let available = stock.entry(product_id.to_string()).or_insert(0);
        *available = add_units(product_id, *available, quantity)?;
        Ok(())
    }
}

fn add_units(product_id: &str, available: i32, quantity: i32) -> Result<i32, RepositoryError> {
    available.checked_add(quantity).ok_or_else(|| {
        RepositoryError::Corrupt(format!(
            "stock overflow for {product_id}: {available} + {quantity}"
        ))
    })
}

#[async_trait]
impl InventoryRepository for InMemoryInventory {
    async fn get_stock(&self, product_id: &str) -> Result<i32, RepositoryError> {
        Ok(self.stock.lock().await.get(product_id).copied().unwrap_or(0))
    }

    async fn reserve_stock(&self, product_id: &str, quantity: i32) -> Result<bool, RepositoryError> {
        let mut stock = self.stock.lock().await;
        match stock.get_mut(product_id) {
            Some(available) if *available >= quantity => {
                *available -= quantity;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_stock(&self, product_id: &str, quantity: i32) -> Result<(), RepositoryError> {
        let mut stock = self.stock.lock().await;
        match stock.get_mut(product_id) {
            Some(available) => *available = add_units(product_id, *available, quantity)?,
            None => {
                warn!(product_id, quantity, "Released stock for unknown product");
                stock.insert(product_id.to_string(), quantity);
            }
        }
        Ok(())
    }
}
