use sqlx::SqlitePool;
use tracing::{error, info};

use crate::database::models::{Catelog, CatelogInput, SortUpdate};
use crate::database::repository::CatelogRepository;
use crate::services::{require, ServiceError};

#[derive(Clone)]
pub struct CatelogService {
    pool: SqlitePool,
}

impl CatelogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> Result<Vec<Catelog>, ServiceError> {
        Ok(CatelogRepository::list_all(&self.pool).await?)
    }

    pub async fn add(&self, input: &CatelogInput) -> Result<i64, ServiceError> {
        require("name", &input.name)?;
        let id = CatelogRepository::insert(&self.pool, input).await?;
        info!("Added catalog {} ({})", id, input.name);
        Ok(id)
    }

    pub async fn update(&self, id: i64, input: &CatelogInput) -> Result<(), ServiceError> {
        require("name", &input.name)?;
        let updated = CatelogRepository::update(&self.pool, id, input).await?;
        if updated == 0 {
            return Err(ServiceError::NotFound(format!("catalog {}", id)));
        }
        Ok(())
    }

    /// Tools keep pointing at the removed name; they stay visible
    pub async fn delete(&self, id: i64) -> Result<u64, ServiceError> {
        Ok(CatelogRepository::delete(&self.pool, id).await?)
    }

    /// Applies every update or none
    pub async fn update_sort(&self, updates: &[SortUpdate]) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;
        for update in updates {
            let result = CatelogRepository::update_sort(&mut *tx, update.id, update.sort).await;
            if let Err(e) = result {
                error!("Failed to sort catalog {}, rolling back: {}", update.id, e);
                if let Err(rollback_err) = tx.rollback().await {
                    error!("Rollback failed: {}", rollback_err);
                }
                return Err(e.into());
            }
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{create_test_pool, fail_catelog_sort, insert_catelog};

    async fn sorts(service: &CatelogService) -> Vec<(String, i64)> {
        service
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| (c.name, c.sort))
            .collect()
    }

    #[tokio::test]
    async fn failed_sort_update_leaves_every_row_untouched() {
        let pool = create_test_pool().await;
        let a = insert_catelog(&pool, "a", false).await;
        let b = insert_catelog(&pool, "b", false).await;
        let c = insert_catelog(&pool, "c", false).await;
        fail_catelog_sort(&pool, b).await;
        let service = CatelogService::new(pool);
        let before = sorts(&service).await;

        let result = service
            .update_sort(&[
                SortUpdate { id: a, sort: 5 },
                SortUpdate { id: b, sort: 6 },
                SortUpdate { id: c, sort: 7 },
            ])
            .await;

        assert!(result.is_err());
        assert_eq!(sorts(&service).await, before);
    }

    #[tokio::test]
    async fn sort_update_for_unknown_id_is_a_no_op() {
        let pool = create_test_pool().await;
        let a = insert_catelog(&pool, "a", false).await;
        let service = CatelogService::new(pool);

        service
            .update_sort(&[SortUpdate { id: a, sort: 3 }, SortUpdate { id: 999, sort: 1 }])
            .await
            .unwrap();
        assert_eq!(sorts(&service).await, vec![("a".to_string(), 3)]);
    }

    #[tokio::test]
    async fn add_requires_name() {
        let service = CatelogService::new(create_test_pool().await);
        let result = service.add(&CatelogInput::default()).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let pool = create_test_pool().await;
        let id = insert_catelog(&pool, "dev", false).await;
        let service = CatelogService::new(pool);

        let input = CatelogInput { name: "ops".to_string(), sort: 2, hide: true };
        service.update(id, &input).await.unwrap();
        let all = service.list_all().await.unwrap();
        assert_eq!(all[0].name, "ops");
        assert!(all[0].hide);

        assert_eq!(service.delete(id).await.unwrap(), 1);
        assert!(service.list_all().await.unwrap().is_empty());
        assert!(matches!(service.update(id, &input).await, Err(ServiceError::NotFound(_))));
    }
}
