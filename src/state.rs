use sqlx::SqlitePool;

use crate::logo::LogoJobs;
use crate::services::{
    CatelogService, DashboardService, GuestLock, ImgService, SettingService, TokenService, ToolService,
    UserService,
};

/// Shared handler state. Every service only wraps the pool, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tools: ToolService,
    pub catelogs: CatelogService,
    pub settings: SettingService,
    pub guest_lock: GuestLock,
    pub dashboard: DashboardService,
    pub imgs: ImgService,
    pub tokens: TokenService,
    pub users: UserService,
    pub logo_jobs: LogoJobs,
}

impl AppState {
    pub fn new(pool: SqlitePool, logo_jobs: LogoJobs) -> Self {
        let settings = SettingService::new(pool.clone());
        Self {
            tools: ToolService::new(pool.clone()),
            catelogs: CatelogService::new(pool.clone()),
            guest_lock: GuestLock::new(settings.clone()),
            settings,
            dashboard: DashboardService::new(pool.clone()),
            imgs: ImgService::new(pool.clone()),
            tokens: TokenService::new(pool.clone()),
            users: UserService::new(pool.clone()),
            logo_jobs,
            pool,
        }
    }
}
