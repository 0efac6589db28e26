use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{generate_jwt, Claims};
use crate::database::models::ApiToken;
use crate::database::repository::TokenRepository;
use crate::services::{require, ServiceError};

/// API tokens are signed JWTs whose row must stay enabled to be honored.
#[derive(Clone)]
pub struct TokenService {
    pool: SqlitePool,
}

impl TokenService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ApiToken>, ServiceError> {
        Ok(TokenRepository::list_enabled(&self.pool).await?)
    }

    pub async fn create(&self, name: &str) -> Result<ApiToken, ServiceError> {
        require("name", name)?;

        let mut tx = self.pool.begin().await?;
        let id = TokenRepository::insert_pending(&mut *tx, name).await?;
        let value = generate_jwt(&Claims::api(id, name))?;
        TokenRepository::set_value(&mut *tx, id, &value).await?;
        tx.commit().await?;

        info!("Created API token {} ({})", id, name);
        Ok(ApiToken {
            id,
            name: name.to_string(),
            value,
            disabled: false,
        })
    }

    pub async fn disable(&self, id: i64) -> Result<(), ServiceError> {
        let updated = TokenRepository::disable(&self.pool, id).await?;
        if updated == 0 {
            return Err(ServiceError::NotFound(format!("api token {}", id)));
        }
        info!("Disabled API token {}", id);
        Ok(())
    }

    /// False for unknown, disabled or unreadable tokens
    pub async fn is_enabled(&self, id: i64) -> bool {
        matches!(
            TokenRepository::find_by_id(&self.pool, id).await,
            Ok(Some(token)) if !token.disabled
        )
    }
}
