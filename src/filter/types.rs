use serde::{Deserialize, Serialize};

use crate::config::PaginationConfig;

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

/// Page coordinates after clamping. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Missing or non-positive values fall back to page 1 and the configured
    /// default size; sizes above the configured ceiling are capped.
    pub fn clamp(page: Option<i64>, size: Option<i64>, config: &PaginationConfig) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let size = size
            .filter(|s| *s >= 1)
            .unwrap_or(config.default_page_size.max(1));
        let size = if config.max_page_size >= 1 { size.min(config.max_page_size) } else { size };
        Self { page, size }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}
