use crate::error::{LedgerError, LedgerResult};
use crate::storage::connection::DbConnection;
use crate::storage::traits::PaymentStore;
use async_trait::async_trait;
use shared::RentalPayment;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Repository for monthly rent records
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

fn row_to_payment(row: &SqliteRow) -> LedgerResult<RentalPayment> {
    let status: String = row.get("payment_status");
    Ok(RentalPayment {
        id: row.get("id"),
        room_number: row.get("room_number"),
        payment_year: row.get::<i64, _>("payment_year") as i32,
        payment_month: row.get::<i64, _>("payment_month") as u32,
        amount_paid: row.get("amount_paid"),
        payment_date: row.get("payment_date"),
        payment_status: shared::PaymentStatus::from_str(&status)
            .map_err(|e| LedgerError::Corrupted(e.to_string()))?,
        notes: row.get("notes"),
    })
}

#[async_trait]
impl PaymentStore for PaymentRepository {
    async fn insert_payment(&self, payment: &RentalPayment) -> LedgerResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO rental_payments
                (room_number, payment_year, payment_month, amount_paid,
                 payment_date, payment_status, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&payment.room_number)
        .bind(payment.payment_year as i64)
        .bind(payment.payment_month as i64)
        .bind(payment.amount_paid)
        .bind(&payment.payment_date)
        .bind(payment.payment_status.as_str())
        .bind(&payment.notes)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn get_payment(
        &self,
        room_number: &str,
        year: i32,
        month: u32,
    ) -> LedgerResult<Option<RentalPayment>> {
        let row = sqlx::query(
            r#"
            SELECT id, room_number, payment_year, payment_month, amount_paid,
                   payment_date, payment_status, notes
            FROM rental_payments
            WHERE room_number = ? AND payment_year = ? AND payment_month = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(room_number)
        .bind(year as i64)
        .bind(month as i64)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_payment(&r)?)),
            None => Ok(None),
        }
    }

    async fn list_payments_for_room(
        &self,
        room_number: &str,
    ) -> LedgerResult<Vec<RentalPayment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_number, payment_year, payment_month, amount_paid,
                   payment_date, payment_status, notes
            FROM rental_payments
            WHERE room_number = ?
            ORDER BY payment_year DESC, payment_month DESC, id DESC
            "#,
        )
        .bind(room_number)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_payment).collect()
    }

    async fn list_payments_for_period(
        &self,
        year: i32,
        month: u32,
    ) -> LedgerResult<Vec<RentalPayment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_number, payment_year, payment_month, amount_paid,
                   payment_date, payment_status, notes
            FROM rental_payments
            WHERE payment_year = ? AND payment_month = ?
            ORDER BY room_number ASC, id ASC
            "#,
        )
        .bind(year as i64)
        .bind(month as i64)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_payment).collect()
    }

    async fn update_payment(&self, payment: &RentalPayment) -> LedgerResult<()> {
        sqlx::query(
            r#"
            UPDATE rental_payments
            SET amount_paid = ?, payment_date = ?, payment_status = ?, notes = ?
            WHERE id = ?
            "#,
        )
        .bind(payment.amount_paid)
        .bind(&payment.payment_date)
        .bind(payment.payment_status.as_str())
        .bind(&payment.notes)
        .bind(payment.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
