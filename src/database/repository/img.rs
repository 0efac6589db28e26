use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::Img;

/// Bytes left as-is in a cache key, everything else is `%XX`
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Cache rows are keyed by the query-escaped logo URL, spaces become `+`.
/// Existing databases hold keys in this exact form.
pub fn cache_key(url: &str) -> String {
    url.split(' ')
        .map(|part| utf8_percent_encode(part, QUERY_ESCAPE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

pub struct ImgRepository;

impl ImgRepository {
    pub async fn find_by_url(pool: &SqlitePool, url: &str) -> Result<Option<Img>, DatabaseError> {
        let row = sqlx::query_as::<_, Img>(
            "SELECT id, COALESCE(url, '') AS url, COALESCE(value, '') AS value FROM nav_img WHERE url = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(cache_key(url))
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Replaces any cached value for the URL
    pub async fn upsert(pool: &SqlitePool, url: &str, value: &str) -> Result<(), DatabaseError> {
        let key = cache_key(url);
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM nav_img WHERE url = ?")
            .bind(&key)
            .execute(&mut *tx)
            .await?;
        sqlx::query("INSERT INTO nav_img (url, value) VALUES (?, ?)")
            .bind(&key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_by_url<'e, E>(executor: E, url: &str) -> Result<u64, DatabaseError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let res = sqlx::query("DELETE FROM nav_img WHERE url = ?")
            .bind(cache_key(url))
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_query_escaped() {
        assert_eq!(
            cache_key("https://example.com/favicon.ico?a=1&b=2"),
            "https%3A%2F%2Fexample.com%2Ffavicon.ico%3Fa%3D1%26b%3D2"
        );
        assert_eq!(cache_key("a b"), "a+b");
        assert_eq!(cache_key("a+b"), "a%2Bb");
    }

    #[test]
    fn cache_key_keeps_tilde_and_escapes_star() {
        assert_eq!(
            cache_key("https://x.com/~u/a*b.ico"),
            "https%3A%2F%2Fx.com%2F~u%2Fa%2Ab.ico"
        );
        assert_eq!(cache_key("https://x.com/ü.png"), "https%3A%2F%2Fx.com%2F%C3%BC.png");
    }
}
