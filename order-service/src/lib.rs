pub mod api;
pub mod clock;
pub mod config;
pub mod memory;
mod models;
pub mod pricing;
mod schema;
pub mod service;
pub mod store;

#[cfg(test)]
mod testing;

use diesel_migrations::{embed_migrations, EmbeddedMigrations};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
