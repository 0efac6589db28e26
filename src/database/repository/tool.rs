use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Tool, ToolInput, ToolRow};

const SELECT_TOOLS: &str = "SELECT id, name, url, logo, catelog, \"desc\", sort, hide FROM nav_table";

pub struct ToolRepository;

impl ToolRepository {
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Tool>, DatabaseError> {
        let rows = sqlx::query_as::<_, ToolRow>(&format!("{} ORDER BY COALESCE(sort, 0) ASC, id ASC", SELECT_TOOLS))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Tool::from).collect())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Tool>, DatabaseError> {
        let row = sqlx::query_as::<_, ToolRow>(&format!("{} WHERE id = ?", SELECT_TOOLS))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Tool::from))
    }

    /// Logo of the tool, `None` when the row is gone
    pub async fn find_logo(pool: &SqlitePool, id: i64) -> Result<Option<String>, DatabaseError> {
        let logo: Option<Option<String>> = sqlx::query_scalar("SELECT logo FROM nav_table WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(logo.map(Option::unwrap_or_default))
    }

    pub async fn insert<'e, E>(executor: E, input: &ToolInput) -> Result<i64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query(
            "INSERT INTO nav_table (name, url, logo, catelog, \"desc\", sort, hide) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.logo)
        .bind(&input.catelog)
        .bind(&input.desc)
        .bind(input.sort)
        .bind(input.hide)
        .execute(executor)
        .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn update<'e, E>(executor: E, id: i64, input: &ToolInput) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query(
            "UPDATE nav_table SET name = ?, url = ?, logo = ?, catelog = ?, \"desc\" = ?, sort = ?, hide = ? WHERE id = ?",
        )
        .bind(&input.name)
        .bind(&input.url)
        .bind(&input.logo)
        .bind(&input.catelog)
        .bind(&input.desc)
        .bind(input.sort)
        .bind(input.hide)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(res.rows_affected())
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("DELETE FROM nav_table WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn update_sort<'e, E>(executor: E, id: i64, sort: i64) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("UPDATE nav_table SET sort = ? WHERE id = ?")
            .bind(sort)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }

    /// Only fills a logo nobody has set in the meantime
    pub async fn set_logo_if_empty(pool: &SqlitePool, id: i64, logo: &str) -> Result<u64, DatabaseError> {
        let res = sqlx::query("UPDATE nav_table SET logo = ? WHERE id = ? AND (logo IS NULL OR logo = '')")
            .bind(logo)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(res.rows_affected())
    }
}
