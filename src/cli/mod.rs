pub mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::config;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "nav")]
#[command(about = "Van Nav admin CLI - maintenance tasks against the local database")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Database URL, overrides DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create or upgrade the schema and seed defaults")]
    Migrate,

    #[command(about = "Write every tool to a JSON file")]
    Export { file: PathBuf },

    #[command(about = "Import tools from a JSON file produced by export")]
    Import { file: PathBuf },

    #[command(about = "Set a new password for an admin user")]
    ResetPassword { name: String, password: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let pool = open_pool(cli.database_url.as_deref()).await?;

    match cli.command {
        Commands::Migrate => commands::db::migrate(&pool, output_format).await,
        Commands::Export { file } => commands::tools::export(&pool, &file, output_format).await,
        Commands::Import { file } => commands::tools::import(&pool, &file, output_format).await,
        Commands::ResetPassword { name, password } => {
            commands::user::reset_password(&pool, &name, &password, output_format).await
        }
    }
}

/// Connects and brings the schema up to date; every command needs both
async fn open_pool(database_url: Option<&str>) -> anyhow::Result<SqlitePool> {
    let mut database = config::config().database.clone();
    if let Some(url) = database_url {
        database.url = url.to_string();
    }
    let pool = DatabaseManager::connect(&database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(pool)
}
