use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Catelog, CatelogInput, CatelogRow};

pub struct CatelogRepository;

impl CatelogRepository {
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Catelog>, DatabaseError> {
        let rows = sqlx::query_as::<_, CatelogRow>(
            "SELECT id, name, sort, hide FROM nav_catelog ORDER BY COALESCE(sort, 0) ASC, id ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(Catelog::from).collect())
    }

    pub async fn exists_by_name<'e, E>(executor: E, name: &str) -> Result<bool, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM nav_catelog WHERE name = ?")
            .bind(name)
            .fetch_one(executor)
            .await?;
        Ok(count > 0)
    }

    pub async fn insert<'e, E>(executor: E, input: &CatelogInput) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("INSERT INTO nav_catelog (name, sort, hide) VALUES (?, ?, ?)")
            .bind(&input.name)
            .bind(input.sort)
            .bind(input.hide)
            .execute(executor)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update(pool: &SqlitePool, id: i64, input: &CatelogInput) -> Result<u64, DatabaseError> {
        let res = sqlx::query("UPDATE nav_catelog SET name = ?, sort = ?, hide = ? WHERE id = ?")
            .bind(&input.name)
            .bind(input.sort)
            .bind(input.hide)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, DatabaseError> {
        let res = sqlx::query("DELETE FROM nav_catelog WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn update_sort<'e, E>(executor: E, id: i64, sort: i64) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("UPDATE nav_catelog SET sort = ? WHERE id = ?")
            .bind(sort)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }
}
