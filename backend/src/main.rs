use std::net::SocketAddr;

use tracing::{info, Level};

use rental_ledger_backend::{create_router, initialize_backend};

const DEFAULT_DATABASE_URL: &str = "sqlite:rental_ledger.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let database_url = std::env::var("RENTAL_LEDGER_DB")
        .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let bind_addr =
        std::env::var("RENTAL_LEDGER_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    info!("Using database {}", database_url);
    let app_state = initialize_backend(&database_url).await?;
    let app = create_router(app_state);

    let addr: SocketAddr = bind_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
