//! # REST API for Tenant Records
//!
//! Endpoints for creating, replacing, retrieving, and retiring tenants.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{TenantListQuery, UpsertTenantRequest};

/// Create or replace the tenant record for a room
pub async fn upsert_tenant(
    State(state): State<AppState>,
    Json(request): Json<UpsertTenantRequest>,
) -> impl IntoResponse {
    info!("POST /api/tenants - room: {}", request.room_number);

    match state.tenant_service.upsert_tenant(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to save tenant: {}", e);
            e.into_response()
        }
    }
}

/// Get the tenant for a room
pub async fn get_tenant(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/tenants/{}", room);

    match state.tenant_service.get_tenant(&room).await {
        Ok(Some(tenant)) => (StatusCode::OK, Json(tenant)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Tenant not found").into_response(),
        Err(e) => {
            error!("Failed to get tenant: {}", e);
            e.into_response()
        }
    }
}

/// List tenants, optionally including those that have moved out
pub async fn list_tenants(
    State(state): State<AppState>,
    Query(query): Query<TenantListQuery>,
) -> impl IntoResponse {
    info!("GET /api/tenants");

    let include_inactive = query.include_inactive.unwrap_or(false);
    match state.tenant_service.list_tenants(include_inactive).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to list tenants: {}", e);
            e.into_response()
        }
    }
}

/// Flag a tenant as moved out; the record is retained
pub async fn move_out(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/tenants/{}/move-out", room);

    match state.tenant_service.move_out(&room).await {
        Ok(()) => (StatusCode::NO_CONTENT, "").into_response(),
        Err(e) => {
            error!("Failed to mark move-out: {}", e);
            e.into_response()
        }
    }
}
