use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::{ApiToken, TokenRow};

pub struct TokenRepository;

impl TokenRepository {
    pub async fn list_enabled(pool: &SqlitePool) -> Result<Vec<ApiToken>, DatabaseError> {
        let rows = sqlx::query_as::<_, TokenRow>(
            "SELECT id, name, value, disabled FROM nav_api_token WHERE COALESCE(disabled, 0) = 0 ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(ApiToken::from).collect())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ApiToken>, DatabaseError> {
        let row = sqlx::query_as::<_, TokenRow>("SELECT id, name, value, disabled FROM nav_api_token WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(ApiToken::from))
    }

    /// Reserves a row; the signed value is written once the id is known
    pub async fn insert_pending<'e, E>(executor: E, name: &str) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("INSERT INTO nav_api_token (name, value, disabled) VALUES (?, '', 0)")
            .bind(name)
            .execute(executor)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn set_value<'e, E>(executor: E, id: i64, value: &str) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("UPDATE nav_api_token SET value = ? WHERE id = ?")
            .bind(value)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn disable(pool: &SqlitePool, id: i64) -> Result<u64, DatabaseError> {
        let res = sqlx::query("UPDATE nav_api_token SET disabled = 1 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected())
    }
}
