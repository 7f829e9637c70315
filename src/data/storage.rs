use {
    crate::{config::PERSISTENCE, domain::PricePoint},
    anyhow::{Context, Result},
    async_trait::async_trait,
    sqlx::{
        ConnectOptions, Pool, QueryBuilder, Row, Sqlite,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    std::{str::FromStr, time::Duration},
};

#[async_trait]
pub trait PriceHistoryStorage: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    async fn latest_time(&self) -> Result<Option<i64>>;
    /// Returns how many points were new. Existing timestamps are left untouched.
    async fn insert_points(&self, points: &[PricePoint]) -> Result<u64>;
    /// Ascending by time, optionally from `start_time` (inclusive).
    async fn load_points(&self, start_time: Option<i64>) -> Result<Vec<PricePoint>>;
    async fn delete_all(&self) -> Result<u64>;
    async fn count(&self) -> Result<u64>;
}

pub struct SqliteStorage {
    pool: Pool<Sqlite>,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(60))
            .synchronous(SqliteSynchronous::Normal)
            .log_slow_statements(log::LevelFilter::Warn, Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("opening price history database {}", db_path))?;

        Ok(Self { pool })
    }

    /// Private database that lives as long as this value. One connection,
    /// never recycled, since every SQLite memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await
            .context("opening in-memory database")?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl PriceHistoryStorage for SqliteStorage {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS price_history (
                time INTEGER PRIMARY KEY NOT NULL,
                low REAL NOT NULL,
                high REAL NOT NULL,
                open REAL NOT NULL,
                close REAL NOT NULL,
                volume REAL NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn latest_time(&self) -> Result<Option<i64>> {
        let result = sqlx::query("SELECT MAX(time) as last_time FROM price_history")
            .fetch_one(&self.pool)
            .await?;

        let last_time: Option<i64> = result.try_get("last_time")?;
        Ok(last_time)
    }

    async fn insert_points(&self, points: &[PricePoint]) -> Result<u64> {
        if points.is_empty() {
            return Ok(0);
        }

        let mut inserted = 0;
        for chunk in points.chunks(PERSISTENCE.insert_chunk) {
            let mut query_builder = QueryBuilder::new(
                "INSERT OR IGNORE INTO price_history (time, low, high, open, close, volume) ",
            );

            query_builder.push_values(chunk, |mut b, p| {
                b.push_bind(p.time)
                    .push_bind(p.low)
                    .push_bind(p.high)
                    .push_bind(p.open)
                    .push_bind(p.close)
                    .push_bind(p.volume);
            });

            inserted += query_builder
                .build()
                .execute(&self.pool)
                .await?
                .rows_affected();
        }

        if crate::config::DF.log_storage {
            log::info!("Stored {} of {} price points", inserted, points.len());
        }
        Ok(inserted)
    }

    async fn load_points(&self, start_time: Option<i64>) -> Result<Vec<PricePoint>> {
        let query_str = if start_time.is_some() {
            r#"
            SELECT time, low, high, open, close, volume
            FROM price_history
            WHERE time >= ?
            ORDER BY time ASC
            "#
        } else {
            r#"
            SELECT time, low, high, open, close, volume
            FROM price_history
            ORDER BY time ASC
            "#
        };

        let mut query = sqlx::query(query_str);

        if let Some(ts) = start_time {
            query = query.bind(ts);
        }

        let rows = query.fetch_all(&self.pool).await?;

        let points = rows
            .iter()
            .map(|row| {
                PricePoint::new(
                    row.get("time"),
                    row.get("low"),
                    row.get("high"),
                    row.get("open"),
                    row.get("close"),
                    row.get("volume"),
                )
            })
            .collect();

        Ok(points)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM price_history")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as n FROM price_history")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.try_get("n")?;
        Ok(n.max(0) as u64)
    }
}
