use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::User;

pub struct UserRepository;

impl UserRepository {
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, password FROM nav_user WHERE name = ? ORDER BY id ASC LIMIT 1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, password FROM nav_user WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    pub async fn update(pool: &SqlitePool, id: i64, name: &str, password: &str) -> Result<u64, DatabaseError> {
        let res = sqlx::query("UPDATE nav_user SET name = ?, password = ? WHERE id = ?")
            .bind(name)
            .bind(password)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected())
    }
}
