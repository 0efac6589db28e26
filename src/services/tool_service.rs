use std::collections::BTreeSet;

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::database::models::{CatelogInput, SortUpdate, Tool, ToolInput, ToolRow};
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::{CatelogRepository, ImgRepository, ToolRepository};
use crate::database::DatabaseError;
use crate::filter::{PageRequest, ToolFilter};
use crate::services::{require, ServiceError};

#[derive(Debug, Clone, Serialize)]
pub struct ToolPage {
    pub items: Vec<Tool>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

/// A cached logo that could not be removed alongside its tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupWarning {
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReport {
    pub deleted: u64,
    pub cleanup_warnings: Vec<CleanupWarning>,
}

#[derive(Clone)]
pub struct ToolService {
    pool: SqlitePool,
}

impl ToolService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Tool>, ServiceError> {
        Ok(ToolRepository::list_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Tool, ServiceError> {
        ToolRepository::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("tool {}", id)))
    }

    /// Filtered page ordered by `sort`. `total` counts the filtered set
    /// before paging. Storage failures yield an empty page.
    pub async fn page(&self, req: PageRequest, keyword: &str, catelog: &str) -> ToolPage {
        let filter = ToolFilter::new(keyword, catelog);

        let result = async {
            let total = QueryBuilder::<ToolRow>::new(filter.to_count_sql())
                .count(&self.pool)
                .await?;
            let rows = QueryBuilder::<ToolRow>::new(filter.to_page_sql(&req))
                .select_all(&self.pool)
                .await?;
            Ok::<_, DatabaseError>((rows, total))
        }
        .await;

        let (items, total) = match result {
            Ok((rows, total)) => (rows.into_iter().map(Tool::from).collect(), total),
            Err(e) => {
                error!("Failed to query tool page: {}", e);
                (Vec::new(), 0)
            }
        };

        ToolPage {
            items,
            total,
            page: req.page,
            size: req.size,
        }
    }

    pub async fn add(&self, input: &ToolInput) -> Result<i64, ServiceError> {
        validate_tool(input)?;
        let id = ToolRepository::insert(&self.pool, input).await?;
        info!("Added tool {} ({})", id, input.name);
        Ok(id)
    }

    pub async fn update(&self, id: i64, input: &ToolInput) -> Result<(), ServiceError> {
        validate_tool(input)?;
        let updated = ToolRepository::update(&self.pool, id, input).await?;
        if updated == 0 {
            return Err(ServiceError::NotFound(format!("tool {}", id)));
        }
        Ok(())
    }

    /// Deletes one tool, then tries to drop its cached logo
    pub async fn delete(&self, id: i64) -> Result<DeleteReport, ServiceError> {
        let logo = self.logo_of(id).await;

        let deleted = ToolRepository::delete(&self.pool, id).await?;

        let mut report = DeleteReport {
            deleted,
            cleanup_warnings: Vec::new(),
        };
        if let Some(url) = logo {
            if let Err(e) = ImgRepository::delete_by_url(&self.pool, &url).await {
                warn!("Failed to delete cached logo {}: {}", url, e);
                report.cleanup_warnings.push(CleanupWarning { url, error: e.to_string() });
            }
        }
        Ok(report)
    }

    /// Deletes all given tools or none of them. Cached logos are removed in
    /// the same transaction, but a failed logo delete only adds a warning.
    pub async fn batch_delete(&self, ids: &[i64]) -> Result<DeleteReport, ServiceError> {
        if ids.is_empty() {
            return Err(ServiceError::Validation("ids must not be empty".to_string()));
        }

        // Read phase, outside the transaction
        let mut logo_urls = BTreeSet::new();
        for id in ids {
            if let Some(url) = self.logo_of(*id).await {
                logo_urls.insert(url);
            }
        }

        let mut tx = self.pool.begin().await?;

        let mut deleted = 0;
        for id in ids {
            let result = ToolRepository::delete(&mut *tx, *id).await;
            match result {
                Ok(n) => deleted += n,
                Err(e) => {
                    error!("Failed to delete tool {}, rolling back batch: {}", id, e);
                    if let Err(rollback_err) = tx.rollback().await {
                        error!("Rollback failed: {}", rollback_err);
                    }
                    return Err(e.into());
                }
            }
        }

        let mut cleanup_warnings = Vec::new();
        for url in logo_urls {
            let result = ImgRepository::delete_by_url(&mut *tx, &url).await;
            if let Err(e) = result {
                warn!("Failed to delete cached logo {}: {}", url, e);
                cleanup_warnings.push(CleanupWarning { url, error: e.to_string() });
            }
        }

        tx.commit().await?;
        info!("Batch deleted {} tools ({} cleanup warnings)", deleted, cleanup_warnings.len());

        Ok(DeleteReport {
            deleted,
            cleanup_warnings,
        })
    }

    /// Applies every update or none
    pub async fn update_sort(&self, updates: &[SortUpdate]) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;
        for update in updates {
            let result = ToolRepository::update_sort(&mut *tx, update.id, update.sort).await;
            if let Err(e) = result {
                error!("Failed to sort tool {}, rolling back: {}", update.id, e);
                if let Err(rollback_err) = tx.rollback().await {
                    error!("Rollback failed: {}", rollback_err);
                }
                return Err(e.into());
            }
        }
        tx.commit().await?;
        Ok(())
    }

    /// Inserts tools and creates the catalogs they reference when missing.
    /// Nothing is written if any tool is invalid.
    pub async fn import(&self, tools: &[ToolInput]) -> Result<usize, ServiceError> {
        for tool in tools {
            validate_tool(tool)?;
        }

        let mut tx = self.pool.begin().await?;

        let names: BTreeSet<&str> = tools.iter().map(|t| t.catelog.as_str()).collect();
        for name in names {
            if !CatelogRepository::exists_by_name(&mut *tx, name).await? {
                let input = CatelogInput {
                    name: name.to_string(),
                    ..Default::default()
                };
                CatelogRepository::insert(&mut *tx, &input).await?;
            }
        }

        for tool in tools {
            ToolRepository::insert(&mut *tx, tool).await?;
        }

        tx.commit().await?;
        info!("Imported {} tools", tools.len());
        Ok(tools.len())
    }

    /// Non-empty logo of a tool. Lookup failures count as "no logo".
    async fn logo_of(&self, id: i64) -> Option<String> {
        match ToolRepository::find_logo(&self.pool, id).await {
            Ok(Some(logo)) if !logo.is_empty() => Some(logo),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read logo of tool {}: {}", id, e);
                None
            }
        }
    }
}

fn validate_tool(input: &ToolInput) -> Result<(), ServiceError> {
    require("name", &input.name)?;
    require("url", &input.url)?;
    require("catelog", &input.catelog)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;
    use crate::testing::*;

    fn req(page: i64, size: i64) -> PageRequest {
        let config = PaginationConfig { default_page_size: 20, max_page_size: 200 };
        PageRequest::clamp(Some(page), Some(size), &config)
    }

    async fn seeded() -> (SqlitePool, ToolService) {
        let pool = create_test_pool().await;
        for i in 0..25 {
            let catelog = if i % 2 == 0 { "dev" } else { "news" };
            let mut input = tool(&format!("Tool{:02}", i), catelog);
            input.sort = 25 - i;
            if i == 3 {
                input.desc = "The GitHub mirror".to_string();
            }
            insert_tool(&pool, input).await;
        }
        (pool.clone(), ToolService::new(pool))
    }

    #[tokio::test]
    async fn page_counts_before_paging() {
        let (_pool, service) = seeded().await;

        let first = service.page(req(1, 10), "", "").await;
        let third = service.page(req(3, 10), "", "").await;
        assert_eq!(first.items.len(), 10);
        assert_eq!(third.items.len(), 5);
        assert_eq!(first.total, 25);
        assert_eq!(third.total, 25);
    }

    #[tokio::test]
    async fn page_orders_by_sort_ascending() {
        let (_pool, service) = seeded().await;
        let page = service.page(req(1, 25), "", "").await;
        let sorts: Vec<i64> = page.items.iter().map(|t| t.sort).collect();
        let mut expected = sorts.clone();
        expected.sort();
        assert_eq!(sorts, expected);
        assert_eq!(page.items[0].name, "Tool24");
    }

    #[tokio::test]
    async fn keyword_matches_name_or_desc_case_insensitively() {
        let (_pool, service) = seeded().await;

        let by_desc = service.page(req(1, 20), "github", "").await;
        assert_eq!(by_desc.total, 1);
        assert_eq!(by_desc.items[0].name, "Tool03");

        let by_name = service.page(req(1, 20), "TOOL1", "").await;
        assert_eq!(by_name.total, 10);
    }

    #[tokio::test]
    async fn keyword_matches_non_ascii_names_as_typed() {
        let pool = create_test_pool().await;
        insert_tool(&pool, tool("Über", "dev")).await;
        let service = ToolService::new(pool);

        assert_eq!(service.page(req(1, 20), "Über", "").await.total, 1);
        assert_eq!(service.page(req(1, 20), "ÜBER", "").await.total, 1);
        assert_eq!(service.page(req(1, 20), "ber", "").await.total, 1);
    }

    #[tokio::test]
    async fn filters_compose_conjunctively() {
        let (_pool, service) = seeded().await;

        let dev = service.page(req(1, 50), "", "dev").await;
        assert_eq!(dev.total, 13);
        assert!(dev.items.iter().all(|t| t.catelog == "dev"));

        let both = service.page(req(1, 50), "Tool1", "dev").await;
        assert_eq!(both.total, 5);
    }

    #[tokio::test]
    async fn keyword_wildcards_are_literal() {
        let (_pool, service) = seeded().await;
        assert_eq!(service.page(req(1, 20), "%", "").await.total, 0);
    }

    #[tokio::test]
    async fn legacy_null_columns_are_coerced() {
        let pool = create_test_pool().await;
        sqlx::query("INSERT INTO nav_table (name, url, logo, catelog, \"desc\", sort, hide) VALUES ('old', 'https://old', NULL, 'dev', NULL, NULL, NULL)")
            .execute(&pool)
            .await
            .unwrap();
        let service = ToolService::new(pool);

        let page = service.page(req(1, 20), "", "").await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].sort, 0);
        assert!(!page.items[0].hide);
    }

    #[tokio::test]
    async fn page_fails_soft_on_storage_error() {
        let pool = create_test_pool().await;
        sqlx::query("DROP TABLE nav_table").execute(&pool).await.unwrap();
        let service = ToolService::new(pool);

        let page = service.page(req(2, 10), "x", "").await;
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 2);
    }

    #[tokio::test]
    async fn add_rejects_missing_fields() {
        let pool = create_test_pool().await;
        let service = ToolService::new(pool.clone());

        let mut input = tool("a", "dev");
        input.url = "  ".to_string();
        assert!(matches!(service.add(&input).await, Err(ServiceError::Validation(_))));
        assert!(tool_ids(&pool).await.is_empty());
    }

    #[tokio::test]
    async fn update_missing_tool_is_not_found() {
        let service = ToolService::new(create_test_pool().await);
        let result = service.update(42, &tool("a", "dev")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn batch_delete_rolls_back_when_any_delete_fails() {
        let pool = create_test_pool().await;
        let mut a = tool("a", "dev");
        a.logo = "https://a.example.com/favicon.ico".to_string();
        let mut b = tool("b", "dev");
        b.logo = "https://b.example.com/favicon.ico".to_string();
        let id1 = insert_tool(&pool, a.clone()).await;
        let id2 = insert_tool(&pool, b.clone()).await;
        let id3 = insert_tool(&pool, tool("c", "dev")).await;
        insert_img(&pool, &a.logo, "aGVsbG8=").await;
        insert_img(&pool, &b.logo, "aGVsbG8=").await;
        fail_tool_delete(&pool, id3).await;

        let service = ToolService::new(pool.clone());
        let result = service.batch_delete(&[id1, id2, id3]).await;

        assert!(result.is_err());
        assert_eq!(tool_ids(&pool).await, vec![id1, id2, id3]);
        assert_eq!(img_count(&pool).await, 2);
    }

    #[tokio::test]
    async fn batch_delete_tolerates_cleanup_failure() {
        let pool = create_test_pool().await;
        let mut a = tool("a", "dev");
        a.logo = "https://a.example.com/favicon.ico".to_string();
        let mut b = tool("b", "dev");
        b.logo = "https://b.example.com/favicon.ico".to_string();
        let id1 = insert_tool(&pool, a.clone()).await;
        let id2 = insert_tool(&pool, b.clone()).await;
        insert_img(&pool, &a.logo, "aGVsbG8=").await;
        insert_img(&pool, &b.logo, "aGVsbG8=").await;
        fail_img_delete(&pool, &a.logo).await;

        let service = ToolService::new(pool.clone());
        let report = service.batch_delete(&[id1, id2]).await.unwrap();

        assert_eq!(report.deleted, 2);
        assert_eq!(report.cleanup_warnings.len(), 1);
        assert_eq!(report.cleanup_warnings[0].url, a.logo);
        assert!(tool_ids(&pool).await.is_empty());
        // only the image whose delete failed is left behind
        assert_eq!(img_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn batch_delete_rejects_empty_ids() {
        let service = ToolService::new(create_test_pool().await);
        assert!(matches!(service.batch_delete(&[]).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn single_delete_removes_cached_logo() {
        let pool = create_test_pool().await;
        let mut a = tool("a", "dev");
        a.logo = "https://a.example.com/favicon.ico".to_string();
        let id = insert_tool(&pool, a.clone()).await;
        insert_img(&pool, &a.logo, "aGVsbG8=").await;

        let report = ToolService::new(pool.clone()).delete(id).await.unwrap();
        assert_eq!(report.deleted, 1);
        assert!(report.cleanup_warnings.is_empty());
        assert_eq!(img_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn update_sort_applies_all() {
        let pool = create_test_pool().await;
        let id1 = insert_tool(&pool, tool("a", "dev")).await;
        let id2 = insert_tool(&pool, tool("b", "dev")).await;
        let service = ToolService::new(pool);

        service
            .update_sort(&[SortUpdate { id: id1, sort: 9 }, SortUpdate { id: id2, sort: 1 }])
            .await
            .unwrap();

        let tools = service.list_all().await.unwrap();
        assert_eq!(tools.iter().map(|t| t.id).collect::<Vec<_>>(), vec![id2, id1]);
    }

    #[tokio::test]
    async fn import_creates_missing_catalogs_once() {
        let pool = create_test_pool().await;
        insert_catelog(&pool, "dev", false).await;
        let service = ToolService::new(pool.clone());

        let imported = service
            .import(&[tool("a", "dev"), tool("b", "ops"), tool("c", "ops")])
            .await
            .unwrap();
        assert_eq!(imported, 3);

        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM nav_catelog ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(names, vec!["dev".to_string(), "ops".to_string()]);
    }

    #[tokio::test]
    async fn import_writes_nothing_when_one_tool_is_invalid() {
        let pool = create_test_pool().await;
        let service = ToolService::new(pool.clone());

        let result = service.import(&[tool("a", "dev"), tool("b", "")]).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(tool_ids(&pool).await.is_empty());
    }
}
