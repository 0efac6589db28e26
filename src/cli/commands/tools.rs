use std::path::Path;

use anyhow::Context;
use serde_json::json;
use sqlx::SqlitePool;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::models::ToolInput;
use crate::services::ToolService;

pub async fn export(pool: &SqlitePool, file: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    let tools = ToolService::new(pool.clone()).list_all().await?;
    let body = serde_json::to_string_pretty(&tools)?;
    std::fs::write(file, body).with_context(|| format!("failed to write {}", file.display()))?;

    output_success(
        &output_format,
        &format!("Exported {} tools to {}", tools.len(), file.display()),
        Some(json!({ "exported": tools.len() })),
    )
}

pub async fn import(pool: &SqlitePool, file: &Path, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let tools: Vec<ToolInput> =
        serde_json::from_str(&body).with_context(|| format!("{} is not a tool export", file.display()))?;

    let imported = ToolService::new(pool.clone()).import(&tools).await?;

    output_success(
        &output_format,
        &format!("Imported {} tools from {}", imported, file.display()),
        Some(json!({ "imported": imported })),
    )
}
