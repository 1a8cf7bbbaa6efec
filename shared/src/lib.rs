mod error;
mod order;
mod repository;

pub use error::{OrderError, RepositoryError};
pub use order::{Order, OrderItem, OrderStatus};
pub use repository::{InventoryRepository, OrderRepository};
