//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use crate::error::LedgerResult;
use async_trait::async_trait;
use shared::{Expense, ExpenseListQuery, RentalPayment, Tenant};

/// Trait defining the interface for tenant storage operations
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// Insert or replace the tenant record for a room
    async fn upsert_tenant(&self, tenant: &Tenant) -> LedgerResult<()>;

    /// Retrieve the tenant for a room, if any
    async fn get_tenant(&self, room_number: &str) -> LedgerResult<Option<Tenant>>;

    /// List tenants ordered by room number, optionally including those
    /// that have moved out
    async fn list_tenants(&self, include_inactive: bool) -> LedgerResult<Vec<Tenant>>;

    /// Flag a tenant as moved out without deleting the row
    /// Returns true if a row was updated
    async fn mark_moved_out(&self, room_number: &str, moved_out_at: &str) -> LedgerResult<bool>;
}

/// Trait defining the interface for rent payment storage operations
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Insert a rent record and return its row id
    ///
    /// This is the plain, non-idempotent insert path: it does NOT check for
    /// an existing record covering the same room and period. Callers that
    /// need the one-record-per-room-month invariant go through the domain
    /// service, which checks before inserting.
    async fn insert_payment(&self, payment: &RentalPayment) -> LedgerResult<i64>;

    /// Get the most recent rent record for a room and period, if any
    async fn get_payment(
        &self,
        room_number: &str,
        year: i32,
        month: u32,
    ) -> LedgerResult<Option<RentalPayment>>;

    /// List all rent records for a room, newest period first
    async fn list_payments_for_room(&self, room_number: &str)
        -> LedgerResult<Vec<RentalPayment>>;

    /// List all rent records for a period, ordered by room
    async fn list_payments_for_period(
        &self,
        year: i32,
        month: u32,
    ) -> LedgerResult<Vec<RentalPayment>>;

    /// Overwrite an existing rent record, keyed by its row id
    async fn update_payment(&self, payment: &RentalPayment) -> LedgerResult<()>;
}

/// Trait defining the interface for expense storage operations
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Insert an expense and return its row id
    async fn insert_expense(&self, expense: &Expense) -> LedgerResult<i64>;

    /// Retrieve an expense by row id
    async fn get_expense(&self, id: i64) -> LedgerResult<Option<Expense>>;

    /// List expenses matching the given filters, newest date first
    async fn list_expenses(&self, filter: &ExpenseListQuery) -> LedgerResult<Vec<Expense>>;

    /// Overwrite an existing expense, keyed by its row id
    async fn update_expense(&self, expense: &Expense) -> LedgerResult<()>;
}
