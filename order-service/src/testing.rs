//! Hand-written test doubles for the order service collaborators.
//!
//! Each double answers with canned values and records every call so tests
//! can assert on the exact interactions.

use async_trait::async_trait;
use shared::*;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCall {
    GetStock(String),
    Reserve(String, i32),
    Release(String, i32),
}

pub struct StubInventory {
    stock: i32,
    reserve_succeeds: bool,
    calls: Mutex<Vec<InventoryCall>>,
}

impl StubInventory {
    pub fn with_stock(stock: i32) -> Self {
        Self {
            stock,
            reserve_succeeds: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing_reservations(mut self) -> Self {
        self.reserve_succeeds = false;
        self
    }

    pub fn calls(&self) -> Vec<InventoryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn reserve_calls(&self) -> Vec<(String, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InventoryCall::Reserve(product, qty) => Some((product, qty)),
                _ => None,
            })
            .collect()
    }

    pub fn release_calls(&self) -> Vec<(String, i32)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InventoryCall::Release(product, qty) => Some((product, qty)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: InventoryCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl InventoryRepository for StubInventory {
    async fn get_stock(&self, product_id: &str) -> Result<i32, RepositoryError> {
        self.record(InventoryCall::GetStock(product_id.to_string()));
        Ok(self.stock)
    }

    async fn reserve_stock(&self, product_id: &str, quantity: i32) -> Result<bool, RepositoryError> {
        self.record(InventoryCall::Reserve(product_id.to_string(), quantity));
        Ok(self.reserve_succeeds)
    }

    async fn release_stock(&self, product_id: &str, quantity: i32) -> Result<(), RepositoryError> {
        self.record(InventoryCall::Release(product_id.to_string(), quantity));
        Ok(())
    }
}

pub struct StubOrders {
    found: Option<Order>,
    assigned_id: Option<String>,
    fail_saves: bool,
    saved: Mutex<Vec<Order>>,
    lookups: Mutex<Vec<String>>,
}

impl StubOrders {
    /// A store with no orders that echoes saved orders back unchanged.
    pub fn empty() -> Self {
        Self {
            found: None,
            assigned_id: None,
            fail_saves: false,
            saved: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// A store whose every lookup returns `order`.
    pub fn returning(order: Order) -> Self {
        Self {
            found: Some(order),
            ..Self::empty()
        }
    }

    /// Saved orders come back with `id`.
    pub fn assigning_id(mut self, id: &str) -> Self {
        self.assigned_id = Some(id.to_string());
        self
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn saved(&self) -> Vec<Order> {
        self.saved.lock().unwrap().clone()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for StubOrders {
    async fn save(&self, mut order: Order) -> Result<Order, RepositoryError> {
        self.saved.lock().unwrap().push(order.clone());
        if self.fail_saves {
            return Err(RepositoryError::Unavailable("connection refused".to_string()));
        }
        if let Some(id) = &self.assigned_id {
            order.id = id.clone();
        }
        Ok(order)
    }

    async fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        self.lookups.lock().unwrap().push(order_id.to_string());
        Ok(self.found.clone())
    }
}
