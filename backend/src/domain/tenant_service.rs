use crate::error::{LedgerError, LedgerResult};
use crate::storage::TenantStore;
use chrono::Utc;
use shared::{
    parse_ledger_date, Tenant, TenantListResponse, TenantResponse, UpsertTenantRequest,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Service for managing tenant records
#[derive(Clone)]
pub struct TenantService {
    store: Arc<dyn TenantStore>,
}

impl TenantService {
    pub fn new(store: Arc<dyn TenantStore>) -> Self {
        Self { store }
    }

    /// Create or replace the tenant record for a room
    pub async fn upsert_tenant(
        &self,
        request: UpsertTenantRequest,
    ) -> LedgerResult<TenantResponse> {
        info!("Saving tenant for room {}", request.room_number);

        self.validate_upsert_request(&request)?;

        let room_number = request.room_number.trim().to_string();
        let now = Utc::now().to_rfc3339();

        // A replacement keeps the original creation timestamp
        let created_at = match self.store.get_tenant(&room_number).await? {
            Some(existing) => existing.created_at,
            None => now.clone(),
        };

        let tenant = Tenant {
            room_number: room_number.clone(),
            tenant_name: request.tenant_name.trim().to_string(),
            phone: request.phone.trim().to_string(),
            deposit: request.deposit,
            monthly_rent: request.monthly_rent,
            lease_start: request.lease_start,
            lease_end: request.lease_end,
            payment_method: request.payment_method,
            notes: request.notes,
            is_active: true,
            created_at,
            updated_at: now,
        };

        self.store.upsert_tenant(&tenant).await?;

        info!(
            "Saved tenant {} for room {}",
            tenant.tenant_name, tenant.room_number
        );

        Ok(TenantResponse {
            success_message: format!("Tenant for room {} saved", tenant.room_number),
            tenant,
        })
    }

    /// Get the tenant for a room
    pub async fn get_tenant(&self, room_number: &str) -> LedgerResult<Option<Tenant>> {
        let tenant = self.store.get_tenant(room_number).await?;
        if tenant.is_none() {
            warn!("No tenant for room {}", room_number);
        }
        Ok(tenant)
    }

    /// List tenants, optionally including those that have moved out
    pub async fn list_tenants(&self, include_inactive: bool) -> LedgerResult<TenantListResponse> {
        let tenants = self.store.list_tenants(include_inactive).await?;
        info!("Found {} tenants", tenants.len());
        Ok(TenantListResponse { tenants })
    }

    /// Flag a tenant as moved out; the record is retained
    pub async fn move_out(&self, room_number: &str) -> LedgerResult<()> {
        info!("Marking room {} as moved out", room_number);

        let now = Utc::now().to_rfc3339();
        if !self.store.mark_moved_out(room_number, &now).await? {
            return Err(LedgerError::UnknownRoom(room_number.to_string()));
        }
        Ok(())
    }

    fn validate_upsert_request(&self, request: &UpsertTenantRequest) -> LedgerResult<()> {
        if request.room_number.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Room number cannot be empty".to_string(),
            ));
        }
        if request.tenant_name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Tenant name cannot be empty".to_string(),
            ));
        }
        if request.tenant_name.len() > 100 {
            return Err(LedgerError::Validation(
                "Tenant name cannot exceed 100 characters".to_string(),
            ));
        }
        if request.deposit < 0.0 {
            return Err(LedgerError::Validation(
                "Deposit cannot be negative".to_string(),
            ));
        }
        if request.monthly_rent <= 0.0 {
            return Err(LedgerError::Validation(
                "Monthly rent must be positive".to_string(),
            ));
        }
        if request.notes.len() > 256 {
            return Err(LedgerError::Validation(
                "Notes cannot exceed 256 characters".to_string(),
            ));
        }

        let start = parse_ledger_date(&request.lease_start).map_err(|_| {
            LedgerError::Validation(format!(
                "Lease start is not a valid date: {}",
                request.lease_start
            ))
        })?;
        let end = parse_ledger_date(&request.lease_end).map_err(|_| {
            LedgerError::Validation(format!(
                "Lease end is not a valid date: {}",
                request.lease_end
            ))
        })?;
        if end < start {
            return Err(LedgerError::Validation(
                "Lease end cannot precede lease start".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, TenantRepository};
    use shared::PaymentMethod;

    async fn setup() -> TenantService {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        TenantService::new(Arc::new(TenantRepository::new(db)))
    }

    fn sample_request(room: &str) -> UpsertTenantRequest {
        UpsertTenantRequest {
            room_number: room.to_string(),
            tenant_name: "Mina Rahimi".to_string(),
            phone: "555-0142".to_string(),
            deposit: 1700.0,
            monthly_rent: 850.0,
            lease_start: "2025-01-01".to_string(),
            lease_end: "2025-12-31".to_string(),
            payment_method: PaymentMethod::Monthly,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_replaces() {
        let service = setup().await;

        let created = service
            .upsert_tenant(sample_request("101"))
            .await
            .expect("Create failed");
        assert!(created.tenant.is_active);

        let mut renewal = sample_request("101");
        renewal.monthly_rent = 900.0;
        let replaced = service
            .upsert_tenant(renewal)
            .await
            .expect("Replace failed");
        assert_eq!(replaced.tenant.monthly_rent, 900.0);
        assert_eq!(
            replaced.tenant.created_at, created.tenant.created_at,
            "replacement keeps the original creation timestamp"
        );

        let listed = service.list_tenants(false).await.expect("List failed");
        assert_eq!(listed.tenants.len(), 1);
    }

    #[tokio::test]
    async fn test_lease_dates_must_be_ordered() {
        let service = setup().await;

        let mut request = sample_request("101");
        request.lease_start = "2025-12-31".to_string();
        request.lease_end = "2025-01-01".to_string();

        let result = service.upsert_tenant(request).await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_blank_fields_and_bad_amounts() {
        let service = setup().await;

        let mut request = sample_request(" ");
        assert!(matches!(
            service.upsert_tenant(request.clone()).await,
            Err(LedgerError::Validation(_))
        ));

        request = sample_request("101");
        request.tenant_name = String::new();
        assert!(matches!(
            service.upsert_tenant(request.clone()).await,
            Err(LedgerError::Validation(_))
        ));

        request = sample_request("101");
        request.monthly_rent = 0.0;
        assert!(matches!(
            service.upsert_tenant(request.clone()).await,
            Err(LedgerError::Validation(_))
        ));

        request = sample_request("101");
        request.deposit = -5.0;
        assert!(matches!(
            service.upsert_tenant(request).await,
            Err(LedgerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_move_out_then_unknown_room() {
        let service = setup().await;

        service
            .upsert_tenant(sample_request("101"))
            .await
            .expect("Create failed");

        service.move_out("101").await.expect("Move-out failed");
        let listed = service.list_tenants(false).await.expect("List failed");
        assert!(listed.tenants.is_empty());

        let result = service.move_out("999").await;
        assert!(matches!(result, Err(LedgerError::UnknownRoom(room)) if room == "999"));
    }
}
