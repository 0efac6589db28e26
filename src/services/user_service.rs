use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::auth::{generate_jwt, Claims};
use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::services::{require, ServiceError};

#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: User,
    pub token: String,
}

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn login(&self, name: &str, password: &str) -> Result<LoginResult, ServiceError> {
        require("name", name)?;
        require("password", password)?;

        let user = UserRepository::find_by_name(&self.pool, name).await?;
        let user = match user {
            Some(user) if user.password == password => user,
            _ => {
                warn!("Rejected login for {}", name);
                return Err(ServiceError::Unauthorized("invalid name or password".to_string()));
            }
        };

        let token = generate_jwt(&Claims::session(user.id, &user.name))?;
        info!("User {} logged in", user.name);
        Ok(LoginResult { user, token })
    }

    pub async fn find(&self, id: i64) -> Result<Option<User>, ServiceError> {
        Ok(UserRepository::find_by_id(&self.pool, id).await?)
    }

    pub async fn update(&self, id: i64, name: &str, password: &str) -> Result<(), ServiceError> {
        require("name", name)?;
        require("password", password)?;

        let updated = UserRepository::update(&self.pool, id, name, password).await?;
        if updated == 0 {
            return Err(ServiceError::NotFound(format!("user {}", id)));
        }
        info!("Updated user {}", id);
        Ok(())
    }

    /// Used by the CLI to recover a lost admin password
    pub async fn reset_password(&self, name: &str, password: &str) -> Result<(), ServiceError> {
        let user = UserRepository::find_by_name(&self.pool, name)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {}", name)))?;
        self.update(user.id, name, password).await
    }
}
