use crate::error::{LedgerError, LedgerResult};
use crate::storage::connection::DbConnection;
use crate::storage::traits::ExpenseStore;
use async_trait::async_trait;
use shared::{Expense, ExpenseListQuery};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row};
use std::str::FromStr;

/// Repository for property expenses
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_expense(row: &SqliteRow) -> LedgerResult<Expense> {
    let category: String = row.get("category");
    Ok(Expense {
        id: row.get("id"),
        expense_date: row.get("expense_date"),
        category: shared::ExpenseCategory::from_str(&category)
            .map_err(|e| LedgerError::Corrupted(e.to_string()))?,
        description: row.get("description"),
        amount: row.get("amount"),
        room_number: row.get("room_number"),
        notes: row.get("notes"),
    })
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn insert_expense(&self, expense: &Expense) -> LedgerResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses
                (expense_date, category, description, amount, room_number, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&expense.expense_date)
        .bind(expense.category.as_str())
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.room_number.as_deref())
        .bind(&expense.notes)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_expense(&self, id: i64) -> LedgerResult<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, expense_date, category, description, amount, room_number, notes
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_expense(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_expenses(&self, filter: &ExpenseListQuery) -> LedgerResult<Vec<Expense>> {
        let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT id, expense_date, category, description, amount, room_number, notes \
             FROM expenses WHERE 1 = 1",
        );

        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(year) = filter.year {
            // expense_date is YYYY-MM-DD, so a prefix match selects the period
            let pattern = match filter.month {
                Some(month) => format!("{:04}-{:02}-%", year, month),
                None => format!("{:04}-%", year),
            };
            builder.push(" AND expense_date LIKE ").push_bind(pattern);
        }
        if let Some(room) = &filter.room {
            builder.push(" AND room_number = ").push_bind(room.clone());
        }
        builder.push(" ORDER BY expense_date DESC, id DESC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;

        rows.iter().map(row_to_expense).collect()
    }

    async fn update_expense(&self, expense: &Expense) -> LedgerResult<()> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET expense_date = ?, category = ?, description = ?, amount = ?,
                room_number = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense.expense_date)
        .bind(expense.category.as_str())
        .bind(&expense.description)
        .bind(expense.amount)
        .bind(expense.room_number.as_deref())
        .bind(&expense.notes)
        .bind(expense.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::repositories::tenant_repository::TenantRepository;
    use crate::storage::traits::TenantStore;
    use shared::{ExpenseCategory, PaymentMethod, Tenant};

    async fn setup() -> (DbConnection, ExpenseRepository) {
        let db = DbConnection::init_test()
            .await
            .expect("Failed to create test database");
        (db.clone(), ExpenseRepository::new(db))
    }

    fn sample_expense(date: &str, category: ExpenseCategory, amount: f64) -> Expense {
        Expense {
            id: 0,
            expense_date: date.to_string(),
            category,
            description: "Sample cost".to_string(),
            amount,
            room_number: None,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let (_db, repo) = setup().await;

        let id = repo
            .insert_expense(&sample_expense("2025-06-10", ExpenseCategory::Utilities, 130.5))
            .await
            .expect("Insert failed");

        let stored = repo
            .get_expense(id)
            .await
            .expect("Get failed")
            .expect("Expense should exist");
        assert_eq!(stored.category, ExpenseCategory::Utilities);
        assert_eq!(stored.amount, 130.5);
        assert_eq!(stored.room_number, None);

        assert!(repo.get_expense(9999).await.expect("Get failed").is_none());
    }

    #[tokio::test]
    async fn test_filters_compose() {
        let (_db, repo) = setup().await;

        repo.insert_expense(&sample_expense("2025-06-10", ExpenseCategory::Utilities, 130.5))
            .await
            .expect("Insert failed");
        repo.insert_expense(&sample_expense("2025-06-20", ExpenseCategory::Maintenance, 80.0))
            .await
            .expect("Insert failed");
        repo.insert_expense(&sample_expense("2024-06-15", ExpenseCategory::Utilities, 110.0))
            .await
            .expect("Insert failed");

        let by_category = repo
            .list_expenses(&ExpenseListQuery {
                category: Some(ExpenseCategory::Utilities),
                ..Default::default()
            })
            .await
            .expect("List failed");
        assert_eq!(by_category.len(), 2);

        let by_period = repo
            .list_expenses(&ExpenseListQuery {
                year: Some(2025),
                month: Some(6),
                ..Default::default()
            })
            .await
            .expect("List failed");
        assert_eq!(by_period.len(), 2);

        let combined = repo
            .list_expenses(&ExpenseListQuery {
                category: Some(ExpenseCategory::Utilities),
                year: Some(2025),
                month: Some(6),
                ..Default::default()
            })
            .await
            .expect("List failed");
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].expense_date, "2025-06-10");

        let everything = repo
            .list_expenses(&ExpenseListQuery::default())
            .await
            .expect("List failed");
        assert_eq!(everything.len(), 3);
        // Newest date first
        assert_eq!(everything[0].expense_date, "2025-06-20");
    }

    #[tokio::test]
    async fn test_room_reference_is_checked_when_present() {
        let (db, repo) = setup().await;

        // Untagged expenses need no tenant row
        repo.insert_expense(&sample_expense("2025-06-10", ExpenseCategory::Mortgage, 2000.0))
            .await
            .expect("Insert failed");

        // Room-tagged expenses are rejected until the tenant exists
        let mut tagged = sample_expense("2025-06-11", ExpenseCategory::Maintenance, 60.0);
        tagged.room_number = Some("101".to_string());
        let result = repo.insert_expense(&tagged).await;
        assert!(matches!(result, Err(LedgerError::Database(_))));

        let tenants = TenantRepository::new(db);
        tenants
            .upsert_tenant(&Tenant {
                room_number: "101".to_string(),
                tenant_name: "Sara Moradi".to_string(),
                phone: String::new(),
                deposit: 0.0,
                monthly_rent: 700.0,
                lease_start: "2025-01-01".to_string(),
                lease_end: "2025-12-31".to_string(),
                payment_method: PaymentMethod::Monthly,
                notes: String::new(),
                is_active: true,
                created_at: "2025-01-01T09:00:00+00:00".to_string(),
                updated_at: "2025-01-01T09:00:00+00:00".to_string(),
            })
            .await
            .expect("Failed to store tenant");

        repo.insert_expense(&tagged)
            .await
            .expect("Insert should succeed once the tenant exists");
    }

    #[tokio::test]
    async fn test_manual_correction_overwrites_fields() {
        let (_db, repo) = setup().await;

        let id = repo
            .insert_expense(&sample_expense("2025-06-10", ExpenseCategory::Misc, 45.0))
            .await
            .expect("Insert failed");

        let mut corrected = repo
            .get_expense(id)
            .await
            .expect("Get failed")
            .expect("Expense should exist");
        corrected.category = ExpenseCategory::Maintenance;
        corrected.amount = 54.0;
        repo.update_expense(&corrected).await.expect("Update failed");

        let stored = repo
            .get_expense(id)
            .await
            .expect("Get failed")
            .expect("Expense should exist");
        assert_eq!(stored.category, ExpenseCategory::Maintenance);
        assert_eq!(stored.amount, 54.0);
    }
}
