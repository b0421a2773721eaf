//! Illustrative sample data for demonstration and manual testing.
//!
//! Tenants are written through the insert-or-replace path, so re-seeding
//! leaves the tenants table unchanged in count. Payments and expenses go
//! through the plain insert path, so every run appends another copy of
//! those rows. That asymmetry is a documented quirk of the seed, not a
//! defect to correct here.

use crate::error::LedgerResult;
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{ExpenseRepository, PaymentRepository, TenantRepository};
use crate::storage::traits::{ExpenseStore, PaymentStore, TenantStore};
use chrono::Utc;
use shared::{Expense, ExpenseCategory, PaymentMethod, PaymentStatus, RentalPayment, Tenant};
use tracing::info;

/// Row counts written by one seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub tenants: usize,
    pub payments: usize,
    pub expenses: usize,
}

/// Populate the three tables with illustrative rows
pub async fn seed_sample_data(db: &DbConnection) -> LedgerResult<SeedSummary> {
    let tenant_repo = TenantRepository::new(db.clone());
    let payment_repo = PaymentRepository::new(db.clone());
    let expense_repo = ExpenseRepository::new(db.clone());

    let now = Utc::now().to_rfc3339();

    let tenants = sample_tenants(&now);
    for tenant in &tenants {
        tenant_repo.upsert_tenant(tenant).await?;
    }
    info!("Seeded {} tenants", tenants.len());

    let payments = sample_payments();
    for payment in &payments {
        payment_repo.insert_payment(payment).await?;
    }
    info!("Seeded {} rent payments", payments.len());

    let expenses = sample_expenses();
    for expense in &expenses {
        expense_repo.insert_expense(expense).await?;
    }
    info!("Seeded {} expenses", expenses.len());

    Ok(SeedSummary {
        tenants: tenants.len(),
        payments: payments.len(),
        expenses: expenses.len(),
    })
}

fn tenant(
    room: &str,
    name: &str,
    phone: &str,
    deposit: f64,
    rent: f64,
    lease_start: &str,
    lease_end: &str,
    method: PaymentMethod,
    notes: &str,
    now: &str,
) -> Tenant {
    Tenant {
        room_number: room.to_string(),
        tenant_name: name.to_string(),
        phone: phone.to_string(),
        deposit,
        monthly_rent: rent,
        lease_start: lease_start.to_string(),
        lease_end: lease_end.to_string(),
        payment_method: method,
        notes: notes.to_string(),
        is_active: true,
        created_at: now.to_string(),
        updated_at: now.to_string(),
    }
}

fn sample_tenants(now: &str) -> Vec<Tenant> {
    vec![
        tenant(
            "101",
            "Mina Rahimi",
            "555-0142",
            1700.0,
            850.0,
            "2025-01-01",
            "2025-12-31",
            PaymentMethod::Monthly,
            "",
            now,
        ),
        tenant(
            "102",
            "Omid Karimi",
            "555-0186",
            1500.0,
            750.0,
            "2025-02-01",
            "2026-01-31",
            PaymentMethod::Monthly,
            "Prefers bank transfer",
            now,
        ),
        tenant(
            "201",
            "Sara Moradi",
            "555-0121",
            1800.0,
            900.0,
            "2024-09-01",
            "2025-08-31",
            PaymentMethod::SemiAnnual,
            "",
            now,
        ),
        tenant(
            "202",
            "Reza Ahmadi",
            "555-0177",
            1600.0,
            800.0,
            "2025-03-15",
            "2026-03-14",
            PaymentMethod::Monthly,
            "Has a cat",
            now,
        ),
        tenant(
            "301",
            "Leila Hosseini",
            "555-0110",
            2400.0,
            1200.0,
            "2025-01-01",
            "2025-12-31",
            PaymentMethod::Annual,
            "Top floor unit",
            now,
        ),
    ]
}

fn payment(
    room: &str,
    year: i32,
    month: u32,
    amount: f64,
    date: &str,
    status: PaymentStatus,
    notes: &str,
) -> RentalPayment {
    RentalPayment {
        id: 0,
        room_number: room.to_string(),
        payment_year: year,
        payment_month: month,
        amount_paid: amount,
        payment_date: date.to_string(),
        payment_status: status,
        notes: notes.to_string(),
    }
}

fn sample_payments() -> Vec<RentalPayment> {
    vec![
        payment("101", 2025, 5, 850.0, "2025-05-02", PaymentStatus::Paid, ""),
        payment("101", 2025, 6, 850.0, "2025-06-03", PaymentStatus::Paid, ""),
        payment("102", 2025, 5, 750.0, "2025-05-01", PaymentStatus::Paid, ""),
        payment(
            "102",
            2025,
            6,
            400.0,
            "2025-06-05",
            PaymentStatus::Partial,
            "Remainder promised mid-month",
        ),
        payment(
            "201",
            2025,
            3,
            5400.0,
            "2025-03-01",
            PaymentStatus::Paid,
            "Semi-annual installment (Mar-Aug)",
        ),
        payment("202", 2025, 5, 800.0, "2025-05-04", PaymentStatus::Paid, ""),
        payment(
            "202",
            2025,
            6,
            0.0,
            "2025-06-01",
            PaymentStatus::Unpaid,
            "Reminder sent",
        ),
        payment(
            "301",
            2025,
            1,
            14400.0,
            "2025-01-02",
            PaymentStatus::Paid,
            "Annual payment for 2025",
        ),
    ]
}

fn expense(
    date: &str,
    category: ExpenseCategory,
    description: &str,
    amount: f64,
    room: Option<&str>,
    notes: &str,
) -> Expense {
    Expense {
        id: 0,
        expense_date: date.to_string(),
        category,
        description: description.to_string(),
        amount,
        room_number: room.map(str::to_string),
        notes: notes.to_string(),
    }
}

fn sample_expenses() -> Vec<Expense> {
    vec![
        expense(
            "2025-05-01",
            ExpenseCategory::Mortgage,
            "May mortgage installment",
            2100.0,
            None,
            "",
        ),
        expense(
            "2025-06-01",
            ExpenseCategory::Mortgage,
            "June mortgage installment",
            2100.0,
            None,
            "",
        ),
        expense(
            "2025-05-18",
            ExpenseCategory::Utilities,
            "Shared electricity and water",
            265.4,
            None,
            "",
        ),
        expense(
            "2025-06-09",
            ExpenseCategory::Maintenance,
            "Replace water heater",
            480.0,
            Some("202"),
            "Old unit leaked",
        ),
        expense(
            "2025-06-12",
            ExpenseCategory::Insurance,
            "Quarterly building insurance",
            390.0,
            None,
            "",
        ),
        expense(
            "2025-06-20",
            ExpenseCategory::Misc,
            "Stairwell light bulbs",
            18.75,
            None,
            "",
        ),
    ]
}
