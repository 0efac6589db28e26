pub mod catelog_service;
pub mod dashboard_service;
pub mod guest_lock;
pub mod img_service;
pub mod setting_service;
pub mod token_service;
pub mod tool_service;
pub mod user_service;
pub mod visibility;

pub use catelog_service::CatelogService;
pub use dashboard_service::{AdminView, DashboardService, DashboardView};
pub use guest_lock::{GuestCookie, GuestLock, LockResult, GUEST_COOKIE_NAME};
pub use img_service::{ImgService, LogoResponse};
pub use setting_service::SettingService;
pub use token_service::TokenService;
pub use tool_service::{DeleteReport, CleanupWarning, ToolPage, ToolService};
pub use user_service::{LoginResult, UserService};

use crate::auth::JwtError;
use crate::database::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

/// Rejects blank required fields
pub(crate) fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
