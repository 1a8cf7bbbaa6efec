use thiserror::Error;

/// Failures raised by inventory and order stores.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("corrupt stored value: {0}")]
    Corrupt(String),
}

/// Caller-visible failures of order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i32,
        available: i32,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

const NOT_FOUND: &str = "Order not found";

impl OrderError {
    pub fn invalid(message: impl Into<String>) -> Self {
        OrderError::InvalidOrder(message.into())
    }

    pub fn not_found(order_id: &str) -> Self {
        OrderError::InvalidOrder(format!("{NOT_FOUND}: {order_id}"))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderError::InvalidOrder(message) if message.starts_with(NOT_FOUND))
    }
}
