use async_trait::async_trait;
use shared::{Order, OrderRepository, RepositoryError};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Orders {
    by_id: HashMap<String, Order>,
    next_seq: u32,
}

/// Process-local order store. New orders get ids `ORD-001`, `ORD-002`, ...
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Orders>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.orders.lock().await.by_id.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, mut order: Order) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.lock().await;
        if order.id.is_empty() {
            orders.next_seq += 1;
            order.id = format!("ORD-{:03}", orders.next_seq);
        }
        orders.by_id.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.lock().await.by_id.get(order_id).cloned())
    }
}
