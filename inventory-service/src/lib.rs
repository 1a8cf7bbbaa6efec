mod memory;
mod models;
mod repository;
pub mod schema;

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub use memory::InMemoryInventory;
pub use models::Inventory;
pub use repository::{DbPool, PgInventoryRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
