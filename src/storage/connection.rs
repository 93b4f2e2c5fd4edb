//! SQLite connection management.
//!
//! The pool is opened once at startup and handed explicitly to every
//! repository that needs it; schema setup is an idempotent step of
//! initialization, not of request handling.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// Shared handle to the travel records database.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if necessary) the database at `url` and ensure the
    /// schema exists.
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?;
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique in-memory name.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Idempotent schema setup. One table, auto-incrementing identifier, no
    /// foreign keys or secondary indexes.
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS travel_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                traveler TEXT NOT NULL,
                position TEXT NOT NULL,
                ta TEXT NOT NULL,
                project TEXT NOT NULL,
                fund TEXT NOT NULL,
                activity TEXT NOT NULL,
                budget_line TEXT NOT NULL,
                airfare_ticket REAL NOT NULL,
                change_fare REAL NOT NULL,
                final_fare REAL NOT NULL,
                airplus_invoice TEXT NOT NULL,
                eticket_number TEXT NOT NULL,
                itinerary TEXT NOT NULL,
                departure_date TEXT,
                return_date TEXT,
                travel_class TEXT NOT NULL,
                trip_type TEXT NOT NULL,
                co2_tons REAL NOT NULL,
                days_travelled INTEGER NOT NULL,
                booked_by TEXT NOT NULL,
                remarks TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
