use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::database::models::{ApiToken, Catelog, Setting, Tool, User};
use crate::database::repository::TokenRepository;
use crate::services::visibility::{filter_hidden_catelogs, filter_hidden_tools};
use crate::services::{CatelogService, GuestLock, SettingService, ToolService};

/// Everything the public dashboard renders in one response
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub tools: Vec<Tool>,
    pub catelogs: Vec<Catelog>,
    pub setting: Setting,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    pub tools: Vec<Tool>,
    pub catelogs: Vec<Catelog>,
    pub setting: Setting,
    pub tokens: Vec<ApiToken>,
    pub user: Option<User>,
}

/// Aggregate read paths. These never fail: storage errors are logged and
/// reported as empty collections.
#[derive(Clone)]
pub struct DashboardService {
    pool: SqlitePool,
    tools: ToolService,
    catelogs: CatelogService,
    settings: SettingService,
    lock: GuestLock,
}

impl DashboardService {
    pub fn new(pool: SqlitePool) -> Self {
        let settings = SettingService::new(pool.clone());
        Self {
            tools: ToolService::new(pool.clone()),
            catelogs: CatelogService::new(pool.clone()),
            lock: GuestLock::new(settings.clone()),
            settings,
            pool,
        }
    }

    /// Public view. A locked dashboard still returns the (masked) settings
    /// so the client can draw the lock screen.
    pub async fn get_all(&self, guest_cookie: Option<&str>, is_admin: bool) -> DashboardView {
        let setting = self.settings.load().await;

        if self.lock.is_locked(guest_cookie).await {
            return DashboardView {
                tools: Vec::new(),
                catelogs: Vec::new(),
                setting,
                locked: true,
            };
        }

        let mut tools = self.tools.list_all().await.unwrap_or_else(|e| {
            error!("Failed to load tools: {}", e);
            Vec::new()
        });
        let mut catelogs = self.catelogs.list_all().await.unwrap_or_else(|e| {
            error!("Failed to load catalogs: {}", e);
            Vec::new()
        });

        if !is_admin {
            tools = filter_hidden_tools(tools, &catelogs);
            catelogs = filter_hidden_catelogs(catelogs);
        }

        DashboardView {
            tools,
            catelogs,
            setting,
            locked: false,
        }
    }

    /// Unfiltered view for the admin panel
    pub async fn get_admin_all(&self, user: Option<User>) -> AdminView {
        let tools = self.tools.list_all().await.unwrap_or_else(|e| {
            error!("Failed to load tools: {}", e);
            Vec::new()
        });
        let catelogs = self.catelogs.list_all().await.unwrap_or_else(|e| {
            error!("Failed to load catalogs: {}", e);
            Vec::new()
        });
        let tokens = TokenRepository::list_enabled(&self.pool).await.unwrap_or_else(|e| {
            error!("Failed to load API tokens: {}", e);
            Vec::new()
        });

        AdminView {
            tools,
            catelogs,
            setting: self.settings.load().await,
            tokens,
            user,
        }
    }
}
