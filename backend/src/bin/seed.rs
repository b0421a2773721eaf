//! Standalone seeder that fills the ledger with illustrative rows.
//!
//! Re-running it leaves the tenants table unchanged but appends another
//! copy of the sample payments and expenses.

use tracing::{info, Level};

use rental_ledger_backend::storage::{seed, DbConnection};

const DEFAULT_DATABASE_URL: &str = "sqlite:rental_ledger.db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let database_url = std::env::var("RENTAL_LEDGER_DB")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    info!("Seeding sample data into {}", database_url);
    let db = DbConnection::new(&database_url).await?;
    let summary = seed::seed_sample_data(&db).await?;

    info!(
        "Done: {} tenants, {} rent payments, {} expenses",
        summary.tenants, summary.payments, summary.expenses
    );

    Ok(())
}
