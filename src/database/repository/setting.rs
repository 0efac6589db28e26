use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::{Setting, SettingRow};

/// The settings table holds one logical row: the one with the smallest id
pub struct SettingRepository;

impl SettingRepository {
    pub async fn find_first(pool: &SqlitePool) -> Result<Option<SettingRow>, DatabaseError> {
        let row = sqlx::query_as::<_, SettingRow>(
            "SELECT id, favicon, title, govRecord, logo192, logo512, hideAdmin, hideGithub, jumpTargetBlank, customJS, customCSS, guestPassword
             FROM nav_setting ORDER BY id ASC LIMIT 1",
        )
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Plaintext guest password of the first row
    pub async fn find_guest_password(pool: &SqlitePool) -> Result<Option<String>, DatabaseError> {
        let password: Option<Option<String>> =
            sqlx::query_scalar("SELECT guestPassword FROM nav_setting ORDER BY id ASC LIMIT 1")
                .fetch_optional(pool)
                .await?;
        Ok(password.flatten())
    }

    /// Overwrites every column of the first row; `guest_password` is the
    /// value to store, never the mask
    pub async fn update_first(pool: &SqlitePool, setting: &Setting, guest_password: &str) -> Result<u64, DatabaseError> {
        let res = sqlx::query(
            "UPDATE nav_setting
             SET favicon = ?, title = ?, govRecord = ?, logo192 = ?, logo512 = ?, hideAdmin = ?, hideGithub = ?,
                 jumpTargetBlank = ?, customJS = ?, customCSS = ?, guestPassword = ?
             WHERE id = (SELECT id FROM nav_setting ORDER BY id ASC LIMIT 1)",
        )
        .bind(&setting.favicon)
        .bind(&setting.title)
        .bind(&setting.gov_record)
        .bind(&setting.logo192)
        .bind(&setting.logo512)
        .bind(setting.hide_admin)
        .bind(setting.hide_github)
        .bind(setting.jump_target_blank)
        .bind(&setting.custom_js)
        .bind(&setting.custom_css)
        .bind(guest_password)
        .execute(pool)
        .await?;
        Ok(res.rows_affected())
    }
}
