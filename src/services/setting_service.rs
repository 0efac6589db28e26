use sqlx::SqlitePool;
use tracing::{error, warn};

use crate::database::models::{Setting, MASKED_PASSWORD};
use crate::database::repository::SettingRepository;
use crate::services::ServiceError;

/// Owner of the settings row and the only holder of the plaintext guest
/// password. Nothing here is cached; every call reads the store.
#[derive(Clone)]
pub struct SettingService {
    pool: SqlitePool,
}

impl SettingService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Current settings with the guest password masked. Falls back to the
    /// built-in defaults when the row cannot be read.
    pub async fn load(&self) -> Setting {
        match SettingRepository::find_first(&self.pool).await {
            Ok(Some(row)) => row.into_masked(),
            Ok(None) => {
                warn!("No settings row found, serving defaults");
                Setting::default()
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
                Setting::default()
            }
        }
    }

    /// Plaintext guest password, empty when unset or unreadable
    pub(crate) async fn real_secret(&self) -> String {
        match SettingRepository::find_guest_password(&self.pool).await {
            Ok(password) => password.unwrap_or_default(),
            Err(e) => {
                error!("Failed to read guest password: {}", e);
                String::new()
            }
        }
    }

    /// Overwrite the settings row. A masked password keeps the stored one;
    /// anything else, the empty string included, replaces it.
    pub async fn save(&self, setting: &Setting) -> Result<(), ServiceError> {
        let guest_password = if setting.guest_password == MASKED_PASSWORD {
            SettingRepository::find_guest_password(&self.pool)
                .await?
                .unwrap_or_default()
        } else {
            setting.guest_password.clone()
        };

        let updated = SettingRepository::update_first(&self.pool, setting, &guest_password).await?;
        if updated == 0 {
            return Err(ServiceError::NotFound("settings row does not exist".to_string()));
        }
        Ok(())
    }
}
