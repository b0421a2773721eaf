use crate::error::{LedgerError, LedgerResult};
use crate::storage::connection::DbConnection;
use crate::storage::traits::TenantStore;
use async_trait::async_trait;
use shared::Tenant;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Repository for tenant records
#[derive(Clone)]
pub struct TenantRepository {
    db: DbConnection,
}

impl TenantRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_tenant(row: &SqliteRow) -> LedgerResult<Tenant> {
    let method: String = row.get("payment_method");
    Ok(Tenant {
        room_number: row.get("room_number"),
        tenant_name: row.get("tenant_name"),
        phone: row.get("phone"),
        deposit: row.get("deposit"),
        monthly_rent: row.get("monthly_rent"),
        lease_start: row.get("lease_start"),
        lease_end: row.get("lease_end"),
        payment_method: shared::PaymentMethod::from_str(&method)
            .map_err(|e| LedgerError::Corrupted(e.to_string()))?,
        notes: row.get("notes"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl TenantStore for TenantRepository {
    async fn upsert_tenant(&self, tenant: &Tenant) -> LedgerResult<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO tenants
                (room_number, tenant_name, phone, deposit, monthly_rent,
                 lease_start, lease_end, payment_method, notes, is_active,
                 created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&tenant.room_number)
        .bind(&tenant.tenant_name)
        .bind(&tenant.phone)
        .bind(tenant.deposit)
        .bind(tenant.monthly_rent)
        .bind(&tenant.lease_start)
        .bind(&tenant.lease_end)
        .bind(tenant.payment_method.as_str())
        .bind(&tenant.notes)
        .bind(tenant.is_active)
        .bind(&tenant.created_at)
        .bind(&tenant.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_tenant(&self, room_number: &str) -> LedgerResult<Option<Tenant>> {
        let row = sqlx::query(
            r#"
            SELECT room_number, tenant_name, phone, deposit, monthly_rent,
                   lease_start, lease_end, payment_method, notes, is_active,
                   created_at, updated_at
            FROM tenants
            WHERE room_number = ?
            "#,
        )
        .bind(room_number)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_tenant(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_tenants(&self, include_inactive: bool) -> LedgerResult<Vec<Tenant>> {
        let query = if include_inactive {
            sqlx::query(
                r#"
                SELECT room_number, tenant_name, phone, deposit, monthly_rent,
                       lease_start, lease_end, payment_method, notes, is_active,
                       created_at, updated_at
                FROM tenants
                ORDER BY room_number ASC
                "#,
            )
        } else {
            sqlx::query(
                r#"
                SELECT room_number, tenant_name, phone, deposit, monthly_rent,
                       lease_start, lease_end, payment_method, notes, is_active,
                       created_at, updated_at
                FROM tenants
                WHERE is_active = TRUE
                ORDER BY room_number ASC
                "#,
            )
        };

        let rows = query.fetch_all(self.db.pool()).await?;

        rows.iter().map(row_to_tenant).collect()
    }

    async fn mark_moved_out(&self, room_number: &str, moved_out_at: &str) -> LedgerResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tenants
            SET is_active = FALSE, updated_at = ?
            WHERE room_number = ?
            "#,
        )
        .bind(moved_out_at)
        .bind(room_number)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PaymentMethod;

    fn sample_tenant(room: &str) -> Tenant {
        Tenant {
            room_number: room.to_string(),
            tenant_name: "Mina Rahimi".to_string(),
            phone: "555-0142".to_string(),
            deposit: 1200.0,
            monthly_rent: 850.0,
            lease_start: "2025-01-01".to_string(),
            lease_end: "2025-12-31".to_string(),
            payment_method: PaymentMethod::Monthly,
            notes: String::new(),
            is_active: true,
            created_at: "2025-01-01T09:00:00+00:00".to_string(),
            updated_at: "2025-01-01T09:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_twice_keeps_one_row_with_latest_values() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let repo = TenantRepository::new(db);

        repo.upsert_tenant(&sample_tenant("101"))
            .await
            .expect("First upsert failed");

        let mut renewed = sample_tenant("101");
        renewed.monthly_rent = 900.0;
        renewed.lease_end = "2026-12-31".to_string();
        repo.upsert_tenant(&renewed)
            .await
            .expect("Second upsert failed");

        let tenants = repo.list_tenants(true).await.expect("List failed");
        assert_eq!(tenants.len(), 1, "room 101 must map to exactly one row");
        assert_eq!(tenants[0].monthly_rent, 900.0);
        assert_eq!(tenants[0].lease_end, "2026-12-31");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_room() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let repo = TenantRepository::new(db);

        for room in ["202", "101", "301"] {
            repo.upsert_tenant(&sample_tenant(room))
                .await
                .expect("Upsert failed");
        }

        let tenants = repo.list_tenants(true).await.expect("List failed");
        let rooms: Vec<&str> = tenants.iter().map(|t| t.room_number.as_str()).collect();
        assert_eq!(rooms, vec!["101", "202", "301"]);
    }

    #[tokio::test]
    async fn test_move_out_retains_the_row() {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        let repo = TenantRepository::new(db);

        repo.upsert_tenant(&sample_tenant("101"))
            .await
            .expect("Upsert failed");

        let updated = repo
            .mark_moved_out("101", "2025-07-01T12:00:00+00:00")
            .await
            .expect("Move-out failed");
        assert!(updated);

        // Row is retained but no longer listed as active
        assert!(repo.list_tenants(false).await.expect("List failed").is_empty());
        let all = repo.list_tenants(true).await.expect("List failed");
        assert_eq!(all.len(), 1);
        assert!(!all[0].is_active);

        // Moving out an unknown room touches nothing
        let updated = repo
            .mark_moved_out("999", "2025-07-01T12:00:00+00:00")
            .await
            .expect("Move-out failed");
        assert!(!updated);
    }
}
