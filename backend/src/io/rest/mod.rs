//! # REST API Interface Layer
//!
//! HTTP endpoints for the rental ledger. This layer handles JSON
//! serialization, translates the typed domain errors to status codes, and
//! logs requests; business logic stays in the domain services.

pub mod expense_apis;
pub mod payment_apis;
pub mod tenant_apis;
