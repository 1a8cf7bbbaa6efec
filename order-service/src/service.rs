use bigdecimal::BigDecimal;
use num_traits::Signed;
use shared::*;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::pricing::DiscountPolicy;

/// Business rules for placing, cancelling and pricing orders.
pub struct OrderService {
    inventory: Arc<dyn InventoryRepository>,
    orders: Arc<dyn OrderRepository>,
    clock: Arc<dyn Clock>,
    pricing: DiscountPolicy,
}

impl OrderService {
    pub fn new(inventory: Arc<dyn InventoryRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self {
            inventory,
            orders,
            clock: Arc::new(SystemClock),
            pricing: DiscountPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_pricing(mut self, pricing: DiscountPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    pub async fn create_order(
        &self,
        product_id: &str,
        quantity: i32,
        customer_id: &str,
    ) -> Result<Order, OrderError> {
        self.create_order_with_items(product_id, quantity, customer_id, Vec::new())
            .await
    }

    /// Reserves `quantity` units of `product_id` and stores a new order
    /// carrying `items`. Nothing is reserved or stored when validation fails.
    pub async fn create_order_with_items(
        &self,
        product_id: &str,
        quantity: i32,
        customer_id: &str,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError> {
        if quantity <= 0 {
            return Err(OrderError::invalid("Quantity must be positive"));
        }
        validate_items(&items)?;

        let available = self.inventory.get_stock(product_id).await?;
        if available < quantity {
            warn!(product_id, requested = quantity, available, "Insufficient stock");
            return Err(OrderError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            });
        }

        if !self.inventory.reserve_stock(product_id, quantity).await? {
            warn!(product_id, requested = quantity, "Stock reservation refused");
            return Err(OrderError::InsufficientStock {
                product_id: product_id.to_string(),
                requested: quantity,
                available,
            });
        }

        let order = Order::new("", product_id, quantity, customer_id, self.clock.now())
            .with_items(items);

        let saved = match self.orders.save(order).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(product_id, quantity, "Failed to save order, releasing stock: {}", e);
                if let Err(release_err) = self.inventory.release_stock(product_id, quantity).await {
                    error!(product_id, quantity, "Failed to release stock: {}", release_err);
                }
                return Err(e.into());
            }
        };

        info!(order_id = %saved.id, product_id, quantity, customer_id, "Order created");
        Ok(saved)
    }

    /// Cancels a `Created` order and puts its quantity back into stock.
    /// The stock is reserved again if the cancelled order cannot be saved.
    pub async fn cancel_order(&self, order_id: &str) -> Result<Order, OrderError> {
        let mut order = self.get_order(order_id).await?;

        order.cancel(self.clock.now())?;
        self.inventory
            .release_stock(&order.product_id, order.quantity)
            .await?;

        let product_id = order.product_id.clone();
        let quantity = order.quantity;
        let saved = match self.orders.save(order).await {
            Ok(saved) => saved,
            Err(e) => {
                error!(order_id, "Failed to save cancelled order, reserving stock again: {}", e);
                match self.inventory.reserve_stock(&product_id, quantity).await {
                    Ok(true) => {}
                    Ok(false) => {
                        error!(order_id, product_id = %product_id, quantity, "Released stock is gone, cannot reserve it again");
                    }
                    Err(reserve_err) => {
                        error!(order_id, product_id = %product_id, quantity, "Failed to reserve stock again: {}", reserve_err);
                    }
                }
                return Err(e.into());
            }
        };

        info!(order_id, "Order cancelled");
        Ok(saved)
    }

    pub async fn calculate_order_total(&self, order_id: &str) -> Result<BigDecimal, OrderError> {
        let order = self.get_order(order_id).await?;
        Ok(self.pricing.total(&order.items))
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OrderError::not_found(order_id))
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    for item in items {
        if item.quantity <= 0 {
            return Err(OrderError::invalid("Item quantity must be positive"));
        }
        if item.unit_price.is_negative() {
            return Err(OrderError::invalid("Unit price must not be negative"));
        }
    }
    Ok(())
}
