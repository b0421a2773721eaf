//! # Domain Module
//!
//! Business rules for the rental ledger. Each service validates input,
//! enforces the record-level invariants (unique rooms, ordered lease dates,
//! one rent record per room per month on the checked path, referenced rooms
//! must exist), and delegates persistence to the storage traits.

pub mod expense_service;
pub mod payment_service;
pub mod tenant_service;

pub use expense_service::ExpenseService;
pub use payment_service::PaymentService;
pub use tenant_service::TenantService;
