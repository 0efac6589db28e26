use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::database::repository::ImgRepository;
use crate::services::ServiceError;

/// What `/api/img` should answer for a logo URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoResponse {
    Redirect(String),
    Image { content_type: &'static str, bytes: Vec<u8> },
}

#[derive(Clone)]
pub struct ImgService {
    pool: SqlitePool,
}

impl ImgService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cached bytes when available, otherwise a redirect. Never fails: a
    /// storage error behaves like a cache miss.
    pub async fn resolve(&self, url: &str) -> LogoResponse {
        let cached = match ImgRepository::find_by_url(&self.pool, url).await {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Image cache lookup failed for {}: {}", url, e);
                None
            }
        };

        let Some(img) = cached else {
            debug!("Image cache miss: {}", url);
            return LogoResponse::Redirect(url.to_string());
        };

        if img.value.starts_with("http") || img.value.starts_with("//") {
            return LogoResponse::Redirect(img.value);
        }

        match STANDARD.decode(img.value.as_bytes()) {
            Ok(bytes) => LogoResponse::Image {
                content_type: content_type_for(url),
                bytes,
            },
            Err(e) => {
                warn!("Cached image for {} is not valid base64: {}", url, e);
                LogoResponse::Redirect(url.to_string())
            }
        }
    }

    pub async fn store(&self, url: &str, bytes: &[u8]) -> Result<(), ServiceError> {
        ImgRepository::upsert(&self.pool, url, &STANDARD.encode(bytes)).await?;
        Ok(())
    }
}

pub fn content_type_for(url: &str) -> &'static str {
    let suffix = url.rsplit('.').next().unwrap_or_default();
    if suffix == "svg" || url.contains(".svg") {
        "image/svg+xml"
    } else if suffix == "png" {
        "image/png"
    } else {
        "image/x-icon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{create_test_pool, insert_img};

    #[test]
    fn content_type_follows_suffix() {
        assert_eq!(content_type_for("https://a.com/logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("https://a.com/logo.svg?v=2"), "image/svg+xml");
        assert_eq!(content_type_for("https://a.com/logo.png"), "image/png");
        assert_eq!(content_type_for("https://a.com/favicon.ico"), "image/x-icon");
        assert_eq!(content_type_for("noext"), "image/x-icon");
    }

    #[tokio::test]
    async fn miss_redirects_to_source() {
        let service = ImgService::new(create_test_pool().await);
        assert_eq!(
            service.resolve("https://a.com/favicon.ico").await,
            LogoResponse::Redirect("https://a.com/favicon.ico".to_string())
        );
    }

    #[tokio::test]
    async fn stored_bytes_are_served() {
        let service = ImgService::new(create_test_pool().await);
        service.store("https://a.com/logo.png", b"\x89PNG").await.unwrap();

        assert_eq!(
            service.resolve("https://a.com/logo.png").await,
            LogoResponse::Image {
                content_type: "image/png",
                bytes: b"\x89PNG".to_vec()
            }
        );
    }

    #[tokio::test]
    async fn url_values_and_garbage_redirect() {
        let pool = create_test_pool().await;
        insert_img(&pool, "https://a.com/x.ico", "//cdn.example.com/x.ico").await;
        insert_img(&pool, "https://b.com/x.ico", "%%% not base64").await;
        let service = ImgService::new(pool);

        assert_eq!(
            service.resolve("https://a.com/x.ico").await,
            LogoResponse::Redirect("//cdn.example.com/x.ico".to_string())
        );
        assert_eq!(
            service.resolve("https://b.com/x.ico").await,
            LogoResponse::Redirect("https://b.com/x.ico".to_string())
        );
    }

    #[tokio::test]
    async fn store_replaces_previous_value() {
        let pool = create_test_pool().await;
        let service = ImgService::new(pool.clone());
        service.store("https://a.com/favicon.ico", b"one").await.unwrap();
        service.store("https://a.com/favicon.ico", b"two").await.unwrap();

        assert_eq!(crate::testing::img_count(&pool).await, 1);
        assert_eq!(
            service.resolve("https://a.com/favicon.ico").await,
            LogoResponse::Image {
                content_type: "image/x-icon",
                bytes: b"two".to_vec()
            }
        );
    }
}
