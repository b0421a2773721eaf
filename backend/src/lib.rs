//! # Rental Ledger Backend
//!
//! Single-landlord rental management: tenant records, monthly rent
//! collection tracking, and expense logging over an embedded SQLite store.
//!
//! The crate is layered:
//!
//! - **Storage**: SQLite connection, schema, and one repository per entity
//! - **Domain**: services enforcing the record-level invariants
//! - **IO**: JSON REST endpoints exposing the services
//!
//! Binaries: the API server (`main.rs`) and the sample-data seeder
//! (`src/bin/seed.rs`).

pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::Method,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{ExpenseService, PaymentService, TenantService};
use crate::storage::{DbConnection, ExpenseRepository, PaymentRepository, TenantRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub tenant_service: TenantService,
    pub payment_service: PaymentService,
    pub expense_service: ExpenseService,
}

/// Initialize the backend against the database at the given URL
pub async fn initialize_backend(database_url: &str) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(database_url).await?;

    info!("Setting up domain services");
    let tenant_repo = Arc::new(TenantRepository::new(db.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(db.clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(db));

    let tenant_service = TenantService::new(tenant_repo.clone());
    let payment_service = PaymentService::new(payment_repo, tenant_repo.clone());
    let expense_service = ExpenseService::new(expense_repo, tenant_repo);

    Ok(AppState {
        tenant_service,
        payment_service,
        expense_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup so a local client can make requests
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route(
            "/tenants",
            get(io::rest::tenant_apis::list_tenants).post(io::rest::tenant_apis::upsert_tenant),
        )
        .route("/tenants/:room", get(io::rest::tenant_apis::get_tenant))
        .route(
            "/tenants/:room/move-out",
            post(io::rest::tenant_apis::move_out),
        )
        .route(
            "/payments",
            get(io::rest::payment_apis::list_payments)
                .post(io::rest::payment_apis::record_payment),
        )
        .route(
            "/payments/:room/:year/:month",
            get(io::rest::payment_apis::get_payment).put(io::rest::payment_apis::amend_payment),
        )
        .route(
            "/expenses",
            get(io::rest::expense_apis::list_expenses).post(io::rest::expense_apis::log_expense),
        )
        .route("/expenses/:id", put(io::rest::expense_apis::correct_expense));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
