use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{OrderError, RepositoryError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Cancelled,
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Shipped => "SHIPPED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            other => Err(RepositoryError::Corrupt(format!("unknown order status {other:?}"))),
        }
    }
}

/// A priced line of an order. Only used for totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity: i32, unit_price: BigDecimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> BigDecimal {
        BigDecimal::from(self.quantity) * &self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Empty until the order repository assigns one.
    pub id: String,
    pub product_id: String,
    pub quantity: i32,
    pub customer_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// A freshly placed order in the `Created` state.
    pub fn new(
        id: impl Into<String>,
        product_id: impl Into<String>,
        quantity: i32,
        customer_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            quantity,
            customer_id: customer_id.into(),
            status: OrderStatus::Created,
            created_at,
            updated_at: None,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// Moves the order to `Cancelled`. Only `Created` orders can be cancelled.
    pub fn cancel(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Created => {
                self.status = OrderStatus::Cancelled;
                self.updated_at = Some(at);
                Ok(())
            }
            OrderStatus::Shipped => Err(OrderError::invalid("Cannot cancel shipped order")),
            OrderStatus::Cancelled => Err(OrderError::invalid("Order already cancelled")),
        }
    }
}
