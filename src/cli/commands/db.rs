use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::DatabaseManager;

/// The pool was already migrated when it was opened; this just reports it.
pub async fn migrate(pool: &SqlitePool, output_format: OutputFormat) -> anyhow::Result<()> {
    DatabaseManager::health_check(pool).await?;
    output_success(&output_format, "Database schema is up to date", None)
}
