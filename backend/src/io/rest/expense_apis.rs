//! # REST API for Expense Logging
//!
//! Endpoints for logging, correcting, and querying property expenses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{CorrectExpenseRequest, CreateExpenseRequest, ExpenseListQuery};

/// Log an incurred cost
pub async fn log_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/expenses - category: {} amount: {}",
        request.category, request.amount
    );

    match state.expense_service.log_expense(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to log expense: {}", e);
            e.into_response()
        }
    }
}

/// Manually correct an expense entry
pub async fn correct_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CorrectExpenseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/expenses/{}", id);

    match state.expense_service.correct_expense(id, request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to correct expense: {}", e);
            e.into_response()
        }
    }
}

/// List expenses matching the given filters
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseListQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses - query: {:?}", query);

    match state.expense_service.list_expenses(query).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list expenses: {}", e);
            e.into_response()
        }
    }
}
