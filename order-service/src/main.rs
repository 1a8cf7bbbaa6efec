use anyhow::Result;
use clap::Parser;
use diesel::{Connection, PgConnection};
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::MigrationHarness;
use inventory_service::{InMemoryInventory, PgInventoryRepository};
use order_service::api;
use order_service::config::{Args, Storage};
use order_service::memory::InMemoryOrderRepository;
use order_service::service::OrderService;
use order_service::store::PgOrderRepository;
use shared::{InventoryRepository, OrderRepository};
use std::sync::Arc;
use tracing::info;

fn run_migrations(database_url: &str) -> Result<()> {
    let mut conn = PgConnection::establish(database_url)?;
    conn.run_pending_migrations(inventory_service::MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;
    conn.run_pending_migrations(order_service::MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    args.validate()?;
    let pricing = args.discount_policy()?;

    let (inventory, orders): (Arc<dyn InventoryRepository>, Arc<dyn OrderRepository>) =
        match args.storage {
            Storage::Postgres => {
                info!("Running database migrations...");
                run_migrations(&args.database_url)?;
                info!("Migrations completed successfully");

                let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&args.database_url);
                let pool = bb8::Pool::builder()
                    .max_size(args.db_pool_size)
                    .build(config)
                    .await?;

                let inventory: Arc<dyn InventoryRepository> =
                    Arc::new(PgInventoryRepository::new(pool.clone()));
                let orders: Arc<dyn OrderRepository> = Arc::new(PgOrderRepository::new(pool));
                (inventory, orders)
            }
            Storage::Memory => {
                info!("Using in-memory storage; orders are lost on exit");
                let inventory = InMemoryInventory::new();
                for (product_id, quantity) in &args.seed_stock {
                    inventory.restock(product_id, *quantity).await?;
                }
                let inventory: Arc<dyn InventoryRepository> = Arc::new(inventory);
                let orders: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
                (inventory, orders)
            }
        };

    let service = OrderService::new(inventory, orders).with_pricing(pricing);
    let app = api::create_router(api::AppState {
        service: Arc::new(service),
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;
    info!("Order service ready to accept HTTP requests at http://0.0.0.0:{}/orders", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
