use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::models::{CatelogInput, ToolInput};
use crate::database::repository::{cache_key, CatelogRepository, ToolRepository};
use crate::database::DatabaseManager;

/// Migrated single-connection in-memory database
pub async fn create_test_pool() -> SqlitePool {
    let pool = DatabaseManager::in_memory().await.unwrap();
    DatabaseManager::migrate(&pool).await.unwrap();
    pool
}

pub fn tool(name: &str, catelog: &str) -> ToolInput {
    ToolInput {
        name: name.to_string(),
        url: format!("https://{}.example.com", name.to_lowercase()),
        catelog: catelog.to_string(),
        ..Default::default()
    }
}

pub async fn insert_tool(pool: &SqlitePool, input: ToolInput) -> i64 {
    ToolRepository::insert(pool, &input).await.unwrap()
}

pub async fn insert_catelog(pool: &SqlitePool, name: &str, hide: bool) -> i64 {
    let input = CatelogInput {
        name: name.to_string(),
        sort: 0,
        hide,
    };
    CatelogRepository::insert(pool, &input).await.unwrap()
}

pub async fn insert_img(pool: &SqlitePool, url: &str, value: &str) {
    sqlx::query("INSERT INTO nav_img (url, value) VALUES (?, ?)")
        .bind(cache_key(url))
        .bind(value)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn tool_ids(pool: &SqlitePool) -> Vec<i64> {
    sqlx::query_scalar("SELECT id FROM nav_table ORDER BY id ASC")
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn img_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM nav_img")
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Makes every DELETE of the given tool row fail at the storage level
pub async fn fail_tool_delete(pool: &SqlitePool, id: i64) {
    let sql = format!(
        "CREATE TRIGGER fail_tool_delete_{id} BEFORE DELETE ON nav_table WHEN OLD.id = {id} \
         BEGIN SELECT RAISE(ABORT, 'injected tool delete failure'); END"
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

/// Makes every DELETE of the cached image for `url` fail at the storage level
pub async fn fail_img_delete(pool: &SqlitePool, url: &str) {
    let key = cache_key(url).replace('\'', "''");
    let sql = format!(
        "CREATE TRIGGER fail_img_delete_{} BEFORE DELETE ON nav_img WHEN OLD.url = '{}' \
         BEGIN SELECT RAISE(ABORT, 'injected image delete failure'); END",
        Uuid::new_v4().simple(),
        key
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

/// Makes every sort update of the given catalog row fail
pub async fn fail_catelog_sort(pool: &SqlitePool, id: i64) {
    let sql = format!(
        "CREATE TRIGGER fail_catelog_sort_{id} BEFORE UPDATE OF sort ON nav_catelog WHEN OLD.id = {id} \
         BEGIN SELECT RAISE(ABORT, 'injected sort failure'); END"
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}
