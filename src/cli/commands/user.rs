use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::services::UserService;

pub async fn reset_password(
    pool: &SqlitePool,
    name: &str,
    password: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    UserService::new(pool.clone()).reset_password(name, password).await?;
    output_success(&output_format, &format!("Password for '{}' updated", name), None)
}
