//! Typed errors for the rental ledger.
//!
//! Store-level constraint violations (duplicate rent records, unknown rooms)
//! surface directly to the caller; there is no retry policy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input failed domain validation before reaching the store
    #[error("{0}")]
    Validation(String),

    /// The referenced room has no tenant record
    #[error("no tenant is registered for room {0}")]
    UnknownRoom(String),

    /// A rent record already exists for the room and period
    #[error("rent for room {room} is already recorded for {year:04}-{month:02}")]
    DuplicatePayment { room: String, year: i32, month: u32 },

    /// No rent record exists for the room and period
    #[error("no rent record for room {room} in {year:04}-{month:02}")]
    PaymentNotFound { room: String, year: i32, month: u32 },

    /// No expense row with the given id
    #[error("no expense with id {0}")]
    ExpenseNotFound(i64),

    /// A stored row could not be decoded into its domain type
    #[error("malformed row in store: {0}")]
    Corrupted(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match &self {
            LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
            LedgerError::UnknownRoom(_)
            | LedgerError::PaymentNotFound { .. }
            | LedgerError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::DuplicatePayment { .. } => StatusCode::CONFLICT,
            LedgerError::Corrupted(_) | LedgerError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
