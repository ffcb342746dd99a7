//! SQLite-backed cache store.
//!
//! The lyrics table is append-only: records are inserted once when a miss is
//! resolved and never updated or deleted. Matching happens on the normalized
//! key columns written alongside each record.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::core::key::NormalizedKey;
use crate::core::lyrics::{LyricsInput, LyricsRecord};
use crate::error::StoreError;

/// Connection pool settings for the lyrics store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub database_url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub max_lifetime: Option<Duration>,
    pub idle_timeout: Option<Duration>,
    pub connect_retries: u32,
    pub connect_retry_delay: Duration,
}

impl StoreOptions {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        let path = database_path.into();

        Self {
            database_url: format!("sqlite:{}", path.display()),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            max_lifetime: Some(Duration::from_secs(1800)),
            idle_timeout: Some(Duration::from_secs(600)),
            connect_retries: 5,
            connect_retry_delay: Duration::from_secs(3),
        }
    }

    /// In-memory database for tests. A single connection keeps every query
    /// on the same database; a second connection would see an empty one.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            max_lifetime: None,
            idle_timeout: None,
            connect_retries: 1,
            connect_retry_delay: Duration::from_millis(50),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn connect_retries(mut self, retries: u32, delay: Duration) -> Self {
        self.connect_retries = retries.max(1);
        self.connect_retry_delay = delay;
        self
    }
}

/// Connect the pool, retrying on failure, then migrate and probe it.
pub async fn connect(options: &StoreOptions) -> Result<SqlitePool, StoreError> {
    let mut attempt = 0u32;
    let pool = loop {
        attempt += 1;
        match try_connect(options).await {
            Ok(pool) => break pool,
            Err(err) if attempt < options.connect_retries => {
                warn!(
                    "Database connection failed (attempt {}/{}): {}",
                    attempt, options.connect_retries, err
                );
                tokio::time::sleep(options.connect_retry_delay).await;
            }
            Err(err) => {
                return Err(StoreError::Connect {
                    attempts: attempt,
                    source: err,
                })
            }
        }
    };

    info!(
        "Connected to database at {} ({} connections)",
        options.database_url,
        pool.size()
    );

    sqlx::migrate!("./migrations").run(&pool).await?;

    sqlx::query("SELECT 1").fetch_one(&pool).await?;

    Ok(pool)
}

async fn try_connect(options: &StoreOptions) -> Result<SqlitePool, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(&options.database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .min_connections(options.min_connections)
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .max_lifetime(options.max_lifetime)
        .idle_timeout(options.idle_timeout)
        .connect_with(connect_options)
        .await
}

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Point lookup by normalized key. With duplicate resolutions of one key
    /// present, the earliest persisted record wins.
    pub async fn get(&self, key: &NormalizedKey) -> Result<Option<LyricsRecord>, StoreError> {
        let record = sqlx::query_as::<_, LyricsRecord>(
            r#"
            SELECT id, name, artist_name, track_name, album_name,
                   duration, instrumental, plain_lyrics, synced_lyrics
            FROM lyrics
            WHERE artist_key = ?1 AND track_key = ?2 AND album_key = ?3
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(&key.artist)
        .bind(&key.track)
        .bind(&key.album)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Append one record under the given key and return it as written. The
    /// id comes from the store; a fractional duration is truncated here.
    pub async fn put(
        &self,
        key: &NormalizedKey,
        input: LyricsInput,
    ) -> Result<LyricsRecord, StoreError> {
        let duration = input.duration.map(|d| d as i64);
        let created_at = chrono::Utc::now().to_rfc3339();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO lyrics (
                name, artist_name, track_name, album_name,
                artist_key, track_key, album_key,
                duration, instrumental, plain_lyrics, synced_lyrics, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.artist_name)
        .bind(&input.track_name)
        .bind(&input.album_name)
        .bind(&key.artist)
        .bind(&key.track)
        .bind(&key.album)
        .bind(duration)
        .bind(input.instrumental)
        .bind(&input.plain_lyrics)
        .bind(&input.synced_lyrics)
        .bind(&created_at)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            "Persisted lyrics record {} for: {} - {}",
            id, input.artist_name, input.track_name
        );

        Ok(LyricsRecord {
            id,
            name: input.name,
            artist_name: input.artist_name,
            track_name: input.track_name,
            album_name: input.album_name,
            duration,
            instrumental: input.instrumental,
            plain_lyrics: input.plain_lyrics,
            synced_lyrics: input.synced_lyrics,
        })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lyrics")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
