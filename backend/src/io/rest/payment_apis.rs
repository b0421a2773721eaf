//! # REST API for the Rent Ledger
//!
//! Endpoints for logging, amending, and querying monthly rent records.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{AmendPaymentRequest, PaymentListQuery, RecordPaymentRequest};

/// Log rent for a room and period (checked insert path)
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/payments - room: {} period: {:04}-{:02}",
        request.room_number, request.payment_year, request.payment_month
    );

    match state.payment_service.record_payment(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to record payment: {}", e);
            e.into_response()
        }
    }
}

/// Get the rent record for a room and period
pub async fn get_payment(
    State(state): State<AppState>,
    Path((room, year, month)): Path<(String, i32, u32)>,
) -> impl IntoResponse {
    info!("GET /api/payments/{}/{}/{}", room, year, month);

    match state.payment_service.get_payment(&room, year, month).await {
        Ok(Some(payment)) => (StatusCode::OK, Json(payment)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Payment not found").into_response(),
        Err(e) => {
            error!("Failed to get payment: {}", e);
            e.into_response()
        }
    }
}

/// Amend an existing rent record's amount, status, or notes
pub async fn amend_payment(
    State(state): State<AppState>,
    Path((room, year, month)): Path<(String, i32, u32)>,
    Json(request): Json<AmendPaymentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/payments/{}/{}/{}", room, year, month);

    match state
        .payment_service
        .amend_payment(&room, year, month, request)
        .await
    {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to amend payment: {}", e);
            e.into_response()
        }
    }
}

/// List rent records by room, or by year and month
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> impl IntoResponse {
    info!("GET /api/payments - query: {:?}", query);

    match state.payment_service.list_payments(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list payments: {}", e);
            e.into_response()
        }
    }
}
