use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::database::schema;

/// Errors from the storage boundary
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Connection pool construction and schema upkeep for the SQLite store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the configured database, creating the file (and its directory) when missing
    pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DatabaseError> {
        Self::ensure_parent_dir(&config.url).await?;

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Opened database pool: {}", config.url);
        Ok(pool)
    }

    /// Single-connection in-memory database. Every statement must see the
    /// same connection, otherwise each one would get its own empty database.
    pub async fn in_memory() -> Result<SqlitePool, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(pool)
    }

    /// Create tables, add columns missing from older databases, backfill
    /// NULL flags and seed the singleton rows
    pub async fn migrate(pool: &SqlitePool) -> Result<(), DatabaseError> {
        for ddl in schema::CREATE_TABLES {
            sqlx::query(ddl).execute(pool).await?;
        }

        for (table, column, definition) in schema::ADDED_COLUMNS {
            if !Self::column_exists(pool, table, column).await? {
                let alter = format!("ALTER TABLE {} ADD COLUMN {} {}", table, Self::quote_identifier(column), definition);
                sqlx::query(&alter)
                    .execute(pool)
                    .await
                    .map_err(|e| DatabaseError::MigrationError(format!("{}.{}: {}", table, column, e)))?;
                info!("Added column {}.{}", table, column);
            }
        }

        for backfill in schema::BACKFILL_DEFAULTS {
            let res = sqlx::query(backfill).execute(pool).await?;
            if res.rows_affected() > 0 {
                debug!("Backfilled {} rows: {}", res.rows_affected(), backfill);
            }
        }

        Self::seed(pool).await?;
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &SqlitePool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    async fn seed(pool: &SqlitePool) -> Result<(), DatabaseError> {
        let settings: i64 = sqlx::query("SELECT COUNT(*) AS count FROM nav_setting")
            .fetch_one(pool)
            .await?
            .try_get("count")?;
        if settings == 0 {
            sqlx::query(schema::SEED_SETTING).execute(pool).await?;
            info!("Seeded default settings");
        }

        let users: i64 = sqlx::query("SELECT COUNT(*) AS count FROM nav_user")
            .fetch_one(pool)
            .await?
            .try_get("count")?;
        if users == 0 {
            sqlx::query(schema::SEED_USER).execute(pool).await?;
            info!("Seeded default admin user");
        }

        Ok(())
    }

    async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool, DatabaseError> {
        let rows = sqlx::query(&format!("PRAGMA table_info({})", table))
            .fetch_all(pool)
            .await?;
        for row in rows {
            let name: String = row.try_get("name")?;
            if name == column {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn ensure_parent_dir(url: &str) -> Result<(), DatabaseError> {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        let path = path.split('?').next().unwrap_or(path);
        if path.is_empty() || path.starts_with(":memory:") {
            return Ok(());
        }
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Quote SQL identifier to prevent injection
    fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrate_is_idempotent_and_seeds_once() {
        let pool = DatabaseManager::in_memory().await.unwrap();
        DatabaseManager::migrate(&pool).await.unwrap();
        DatabaseManager::migrate(&pool).await.unwrap();

        let settings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nav_setting")
            .fetch_one(&pool)
            .await
            .unwrap();
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nav_user")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(settings, 1);
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn migrate_upgrades_legacy_tool_table() {
        let pool = DatabaseManager::in_memory().await.unwrap();
        sqlx::query(
            r#"CREATE TABLE nav_table (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT, url TEXT, logo TEXT, catelog TEXT, "desc" TEXT
            )"#,
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO nav_table (name, url, logo, catelog, \"desc\") VALUES ('a', 'https://a', '', 'dev', '')")
            .execute(&pool)
            .await
            .unwrap();

        DatabaseManager::migrate(&pool).await.unwrap();

        let (sort, hide): (Option<i64>, Option<bool>) =
            sqlx::query_as("SELECT sort, hide FROM nav_table WHERE name = 'a'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(sort, Some(0));
        assert_eq!(hide, Some(false));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(DatabaseManager::quote_identifier("desc"), "\"desc\"");
        assert_eq!(DatabaseManager::quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
