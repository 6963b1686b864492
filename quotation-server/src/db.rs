use crate::error::{RelayError, Result};
use crate::models::{PersistedRecord, Quotation};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tokio::time;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quotation (
                id TEXT PRIMARY KEY,
                code TEXT,
                code_in TEXT,
                bid TEXT,
                create_date TEXT,
                quotation_date DATETIME
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database initialized successfully");
        Ok(())
    }

    /// Writes a new record for `quotation`. If the insert has not completed
    /// within `deadline` it is abandoned and reported as a timeout; a row that
    /// lands afterwards is not reported.
    pub async fn insert_quotation(
        &self,
        quotation: &Quotation,
        deadline: Duration,
    ) -> Result<PersistedRecord> {
        let record = PersistedRecord {
            id: Uuid::new_v4().to_string(),
            code: quotation.code.clone(),
            code_in: quotation.code_in.clone(),
            bid: quotation.bid.clone(),
            create_date: quotation.create_date.clone(),
            quotation_date: Utc::now(),
        };

        let insert = sqlx::query(
            r#"
            INSERT INTO quotation (id, code, code_in, bid, create_date, quotation_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.code)
        .bind(&record.code_in)
        .bind(&record.bid)
        .bind(&record.create_date)
        .bind(&record.quotation_date)
        .execute(&self.pool);

        time::timeout(deadline, insert)
            .await
            .map_err(|_| RelayError::PersistTimeout(deadline))??;

        debug!("Stored quotation {} bid={}", record.id, record.bid);
        Ok(record)
    }

    /// All records in whatever order SQLite hands them back.
    pub async fn list_records(&self) -> Result<Vec<PersistedRecord>> {
        let rows = sqlx::query(
            "SELECT id, code, code_in, bid, create_date, quotation_date FROM quotation",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(PersistedRecord {
                id: row.try_get("id")?,
                code: row.try_get("code")?,
                code_in: row.try_get("code_in")?,
                bid: row.try_get("bid")?,
                create_date: row.try_get("create_date")?,
                quotation_date: row.try_get("quotation_date")?,
            });
        }

        Ok(records)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::{Connection, SqliteConnection};
    use tempfile::TempDir;

    fn database_url(dir: &TempDir) -> String {
        format!("sqlite:{}", dir.path().join("quotation.db").display())
    }

    async fn temp_database() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&database_url(&dir), 1).await.unwrap();
        db.init_schema().await.unwrap();
        (dir, db)
    }

    fn quotation(bid: &str) -> Quotation {
        Quotation {
            code: "USD".to_string(),
            code_in: "BRL".to_string(),
            bid: bid.to_string(),
            create_date: "2023-11-14 19:13:20".to_string(),
        }
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let (_dir, db) = temp_database().await;
        db.init_schema().await.unwrap();
        assert!(db.list_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn inserted_records_round_trip_with_unique_ids() {
        let (_dir, db) = temp_database().await;
        let budget = Duration::from_secs(5);

        let first = db.insert_quotation(&quotation("5.4300"), budget).await.unwrap();
        let second = db.insert_quotation(&quotation("5.4300"), budget).await.unwrap();
        assert_ne!(first.id, second.id);

        let records = db.list_records().await.unwrap();
        assert_eq!(records.len(), 2);
        let stored = records.iter().find(|r| r.id == first.id).unwrap();
        assert_eq!(stored.bid, "5.4300");
        assert_eq!(stored.code_in, "BRL");
        assert_eq!(stored.create_date, "2023-11-14 19:13:20");
        assert_eq!(stored.quotation_date.timestamp(), first.quotation_date.timestamp());
    }

    #[tokio::test]
    async fn insert_on_closed_pool_fails() {
        let (_dir, db) = temp_database().await;
        db.close().await;

        let result = db
            .insert_quotation(&quotation("5.43"), Duration::from_secs(5))
            .await;
        assert!(matches!(result, Err(RelayError::Database(_))));
    }

    #[tokio::test]
    async fn insert_blocked_by_writer_times_out() {
        let (dir, db) = temp_database().await;

        let mut writer = SqliteConnection::connect(&database_url(&dir)).await.unwrap();
        sqlx::query("BEGIN IMMEDIATE").execute(&mut writer).await.unwrap();

        let budget = Duration::from_millis(50);
        let started = std::time::Instant::now();
        let result = db.insert_quotation(&quotation("5.43"), budget).await;

        assert!(matches!(result, Err(RelayError::PersistTimeout(d)) if d == budget));
        assert!(started.elapsed() < Duration::from_secs(2));

        sqlx::query("ROLLBACK").execute(&mut writer).await.unwrap();
    }
}
