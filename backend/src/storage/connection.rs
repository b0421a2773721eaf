use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// DbConnection manages the SQLite pool and schema for the rental ledger
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open the database at the given URL, creating it if it doesn't exist
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    ///
    /// Foreign key enforcement is on for every pooled connection (the sqlx
    /// SQLite driver's default), so the REFERENCES clauses below reject
    /// payments and room-tagged expenses for rooms with no tenant record.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create tenants table, keyed by room number
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tenants (
                room_number TEXT PRIMARY KEY,
                tenant_name TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                deposit REAL NOT NULL DEFAULT 0,
                monthly_rent REAL NOT NULL,
                lease_start TEXT NOT NULL,
                lease_end TEXT NOT NULL,
                payment_method TEXT NOT NULL DEFAULT 'monthly',
                notes TEXT NOT NULL DEFAULT '',
                is_active BOOLEAN NOT NULL DEFAULT TRUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create rental_payments table.
        // The (room_number, payment_year, payment_month) triple is the
        // logical key but deliberately carries no UNIQUE constraint: the
        // checked insert path enforces one record per room per month, while
        // the seed's plain insert path can duplicate rows on re-run.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS rental_payments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_number TEXT NOT NULL,
                payment_year INTEGER NOT NULL,
                payment_month INTEGER NOT NULL CHECK (payment_month >= 1 AND payment_month <= 12),
                amount_paid REAL NOT NULL,
                payment_date TEXT NOT NULL,
                payment_status TEXT NOT NULL DEFAULT 'paid',
                notes TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (room_number) REFERENCES tenants (room_number)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for room filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_rental_payments_room
            ON rental_payments(room_number);
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for period filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_rental_payments_period
            ON rental_payments(payment_year, payment_month);
            "#,
        )
        .execute(pool)
        .await?;

        // Create expenses table; room_number is nullable for costs that are
        // not attributable to a single unit
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                expense_date TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                room_number TEXT,
                notes TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (room_number) REFERENCES tenants (room_number)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for category filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_category
            ON expenses(category);
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for date filtering
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_date
            ON expenses(expense_date);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
