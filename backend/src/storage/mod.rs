//! # Storage Module
//!
//! Handles all data persistence for the rental ledger.
//!
//! The store is a single SQLite file accessed through a sqlx pool. The
//! repositories translate between the shared record types and parameterized
//! SQL; the traits in [`traits`] are the seam the domain layer depends on,
//! so a different backend could be substituted without touching the
//! services.

pub mod connection;
pub mod repositories;
pub mod seed;
pub mod traits;

// Re-export the main types that other modules need
pub use connection::DbConnection;
pub use repositories::{ExpenseRepository, PaymentRepository, TenantRepository};
pub use traits::{ExpenseStore, PaymentStore, TenantStore};
