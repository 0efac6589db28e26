//! Background favicon fetching for tools saved without a logo.
//!
//! The job runs detached from the request that triggered it. It derives
//! `<origin>/favicon.ico` from the tool URL, caches the bytes in `nav_img`
//! and points the tool's logo at that URL unless someone set one meanwhile.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::LogoConfig;
use crate::database::repository::ToolRepository;
use crate::services::ImgService;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Invalid tool url: {0}")]
    InvalidUrl(String),
    #[error("Logo request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Logo request returned status {0}")]
    Status(u16),
    #[error("Logo response was empty")]
    Empty,
}

#[async_trait]
pub trait LogoFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LogoError>;
}

pub struct HttpLogoFetcher {
    client: reqwest::Client,
}

impl HttpLogoFetcher {
    pub fn new(timeout: Duration) -> Result<Self, LogoError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LogoFetcher for HttpLogoFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LogoError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(LogoError::Status(response.status().as_u16()));
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(LogoError::Empty);
        }
        Ok(bytes.to_vec())
    }
}

/// `https://host:port/favicon.ico` for any http(s) tool URL
pub fn favicon_url(tool_url: &str) -> Result<String, LogoError> {
    let parsed = url::Url::parse(tool_url).map_err(|e| LogoError::InvalidUrl(format!("{}: {}", tool_url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(LogoError::InvalidUrl(tool_url.to_string()));
    }
    Ok(format!("{}/favicon.ico", parsed.origin().ascii_serialization()))
}

#[derive(Clone)]
pub struct LogoJobs {
    pool: SqlitePool,
    fetcher: Arc<dyn LogoFetcher>,
    enabled: bool,
}

impl LogoJobs {
    pub fn new(pool: SqlitePool, fetcher: Arc<dyn LogoFetcher>, enabled: bool) -> Self {
        Self { pool, fetcher, enabled }
    }

    /// HTTP fetcher configured from `LOGO_FETCH_*`. Falls back to a disabled
    /// job runner when the client cannot be built.
    pub fn from_config(pool: SqlitePool, config: &LogoConfig) -> Self {
        match HttpLogoFetcher::new(Duration::from_secs(config.fetch_timeout_secs)) {
            Ok(fetcher) => Self::new(pool, Arc::new(fetcher), config.fetch_enabled),
            Err(e) => {
                warn!("Logo fetching disabled, HTTP client unavailable: {}", e);
                Self::new(pool, Arc::new(NoopFetcher), false)
            }
        }
    }

    /// Fire and forget. The handle is only returned so tests can await it.
    pub fn spawn(&self, tool_url: &str, tool_id: i64) -> Option<JoinHandle<()>> {
        if !self.enabled {
            debug!("Logo fetching disabled, skipping tool {}", tool_id);
            return None;
        }
        let jobs = self.clone();
        let tool_url = tool_url.to_string();
        Some(tokio::spawn(async move {
            if let Err(e) = jobs.run(&tool_url, tool_id).await {
                warn!("Logo fetch for tool {} ({}) failed: {}", tool_id, tool_url, e);
            }
        }))
    }

    async fn run(&self, tool_url: &str, tool_id: i64) -> anyhow::Result<()> {
        let logo_url = favicon_url(tool_url)?;
        let bytes = self.fetcher.fetch(&logo_url).await?;

        ImgService::new(self.pool.clone()).store(&logo_url, &bytes).await?;
        let updated = ToolRepository::set_logo_if_empty(&self.pool, tool_id, &logo_url).await?;
        info!("Cached logo {} for tool {} (tool updated: {})", logo_url, tool_id, updated > 0);
        Ok(())
    }
}

struct NoopFetcher;

#[async_trait]
impl LogoFetcher for NoopFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, LogoError> {
        Err(LogoError::Empty)
    }
}
