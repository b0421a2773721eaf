use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used for all calendar dates in the ledger (lease bounds,
/// payment dates, expense dates): ISO 8601 `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a ledger date string (`YYYY-MM-DD`)
pub fn parse_ledger_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

/// Whether a payment month falls in the 1..=12 range
pub fn is_valid_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

/// Whether a payment year is within the range the ledger accepts
pub fn is_plausible_year(year: i32) -> bool {
    (1990..=2100).contains(&year)
}

/// Occupant record for a rental unit, keyed by room number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique room/unit identifier, e.g. "101"
    pub room_number: String,
    pub tenant_name: String,
    pub phone: String,
    /// Security deposit held for the unit
    pub deposit: f64,
    /// Rent due each month
    pub monthly_rent: f64,
    /// Lease start date (`YYYY-MM-DD`)
    pub lease_start: String,
    /// Lease end date (`YYYY-MM-DD`); never precedes lease_start
    pub lease_end: String,
    pub payment_method: PaymentMethod,
    pub notes: String,
    /// False once the tenant has moved out; rows are retained, not deleted
    pub is_active: bool,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// How a tenant pays their rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Monthly,
    SemiAnnual,
    Annual,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Monthly => "monthly",
            PaymentMethod::SemiAnnual => "semi-annual",
            PaymentMethod::Annual => "annual",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "monthly" => Ok(PaymentMethod::Monthly),
            "semi-annual" => Ok(PaymentMethod::SemiAnnual),
            "annual" => Ok(PaymentMethod::Annual),
            other => Err(UnknownVariant::new("payment method", other)),
        }
    }
}

/// Monthly rent ledger entry for a unit
///
/// Logically keyed by (room_number, payment_year, payment_month); the
/// surrogate id exists because the plain insert path used by the seed can
/// produce duplicates for the same period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalPayment {
    pub id: i64,
    pub room_number: String,
    pub payment_year: i32,
    /// 1..=12
    pub payment_month: u32,
    pub amount_paid: f64,
    /// Date the payment was received (`YYYY-MM-DD`)
    pub payment_date: String,
    pub payment_status: PaymentStatus,
    pub notes: String,
}

/// Collection state of a monthly rent record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    Partial,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Partial => "partial",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "partial" => Ok(PaymentStatus::Partial),
            other => Err(UnknownVariant::new("payment status", other)),
        }
    }
}

/// Recorded outflow associated with property operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    /// Date the cost was incurred (`YYYY-MM-DD`)
    pub expense_date: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
    /// Room the cost is attributable to, when it is unit-specific
    pub room_number: Option<String>,
    pub notes: String,
}

/// Bucket an expense falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Mortgage,
    Utilities,
    Insurance,
    Maintenance,
    Misc,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Mortgage => "mortgage",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Misc => "misc",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mortgage" => Ok(ExpenseCategory::Mortgage),
            "utilities" => Ok(ExpenseCategory::Utilities),
            "insurance" => Ok(ExpenseCategory::Insurance),
            "maintenance" => Ok(ExpenseCategory::Maintenance),
            "misc" => Ok(ExpenseCategory::Misc),
            other => Err(UnknownVariant::new("expense category", other)),
        }
    }
}

/// Error returned when a stored or submitted enum value is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Request to create or replace the tenant record for a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertTenantRequest {
    pub room_number: String,
    pub tenant_name: String,
    #[serde(default)]
    pub phone: String,
    pub deposit: f64,
    pub monthly_rent: f64,
    pub lease_start: String,
    pub lease_end: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

/// Response after creating or replacing a tenant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantResponse {
    pub tenant: Tenant,
    pub success_message: String,
}

/// Response containing tenant records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantListResponse {
    pub tenants: Vec<Tenant>,
}

/// Query parameters for listing tenants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantListQuery {
    /// Include tenants that have moved out
    pub include_inactive: Option<bool>,
}

/// Request to log a rent payment for a room and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub room_number: String,
    pub payment_year: i32,
    pub payment_month: u32,
    pub amount_paid: f64,
    pub payment_date: String,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub notes: String,
}

/// Request to amend an existing rent record; absent fields are unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmendPaymentRequest {
    pub amount_paid: Option<f64>,
    pub payment_status: Option<PaymentStatus>,
    pub notes: Option<String>,
}

/// Response after logging or amending a rent payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment: RentalPayment,
    pub success_message: String,
}

/// Response containing rent payment records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub payments: Vec<RentalPayment>,
}

/// Query parameters for listing rent payments; either a room or a
/// year + month period must be given
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentListQuery {
    pub room: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Request to log an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub expense_date: String,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
    pub room_number: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Request to manually correct an expense; absent fields are unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectExpenseRequest {
    pub expense_date: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub room_number: Option<String>,
    pub notes: Option<String>,
}

/// Response after logging or correcting an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

/// Response containing expense records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Query parameters for listing expenses; all filters are optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListQuery {
    pub category: Option<ExpenseCategory>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub room: Option<String>,
}
