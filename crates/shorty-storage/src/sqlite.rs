use async_trait::async_trait;
use shorty_core::repository::{ReadRepository, Repository, Result, UrlMapping};
use shorty_core::{ShortCode, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

const SCHEMA: &str = include_str!("../ddl/sqlite/urls.sql");

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 8;

// Extended result codes for SQLITE_CONSTRAINT_PRIMARYKEY and SQLITE_CONSTRAINT_UNIQUE.
const PRIMARY_KEY_VIOLATION: &str = "1555";
const UNIQUE_VIOLATION: &str = "2067";

/// SQLite implementation of the repository contract.
///
/// Mappings live in a single `urls` table keyed by short code. Inserting an
/// existing code fails with [`StorageError::Conflict`]. Listings are returned
/// in insertion order (`ORDER BY rowid`).
///
/// The file is opened in WAL mode with a busy timeout so that several worker
/// processes can share it; isolation between writers is left to SQLite.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
    schema: Arc<OnceCell<()>>,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The schema is not touched; call [`ensure_schema`](Self::ensure_schema)
    /// once before serving requests.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// Opens (creating if missing) the database file at `path` and makes
    /// sure the `urls` table exists.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| {
                StorageError::Unavailable(format!(
                    "cannot open sqlite database '{}': {e}",
                    path.display()
                ))
            })?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;

        info!(path = %path.display(), "sqlite repository ready");
        Ok(repository)
    }

    /// Creates the `urls` table if it does not exist yet.
    ///
    /// Runs the DDL at most once per repository (and its clones); later calls
    /// return immediately. The statement itself is idempotent, so processes
    /// racing on a fresh file all succeed.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema
            .get_or_try_init(|| async {
                sqlx::query(SCHEMA)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;
                debug!("sqlite schema initialized");
                Ok::<_, StorageError>(())
            })
            .await?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| {
        db_err.is_unique_violation()
            || db_err
                .code()
                .is_some_and(|code| code == PRIMARY_KEY_VIOLATION || code == UNIQUE_VIOLATION)
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed | sqlx::Error::Io(_) => {
            StorageError::Unavailable(message)
        }
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn mapping_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UrlMapping> {
    let code: String = row.try_get("shortcode").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("url").map_err(map_sqlx_error)?;
    let short_code = ShortCode::new(code)
        .map_err(|e| StorageError::InvalidData(format!("stored short code is invalid: {e}")))?;

    Ok(UrlMapping::new(short_code, original_url))
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        let row = sqlx::query(
            r#"
            SELECT url
            FROM urls
            WHERE shortcode = ?
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let original_url: String = row.try_get("url").map_err(map_sqlx_error)?;
        Ok(Some(original_url))
    }

    async fn list_all(&self) -> Result<Vec<UrlMapping>> {
        let rows = sqlx::query(
            r#"
            SELECT shortcode, url
            FROM urls
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(mapping_from_row).collect()
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (shortcode, url)
            VALUES (?, ?)
            "#,
        )
        .bind(code.as_str())
        .bind(original_url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(code.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
