use serde_json::Value;

use super::types::{PageRequest, SqlResult};

const TOOL_COLUMNS: &str = "id, name, url, logo, catelog, \"desc\", sort, hide";

/// Search predicates over `nav_table`. Both the page query and the count
/// query are rendered from the same WHERE clause so `total` always matches
/// the filtered set.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    keyword: Option<String>,
    catelog: Option<String>,
}

impl ToolFilter {
    pub fn new(keyword: &str, catelog: &str) -> Self {
        Self {
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
            catelog: (!catelog.is_empty()).then(|| catelog.to_string()),
        }
    }

    pub fn to_page_sql(&self, page: &PageRequest) -> SqlResult {
        let (where_clause, mut params) = self.where_clause();
        params.push(Value::from(page.limit()));
        params.push(Value::from(page.offset()));
        let query = format!(
            "SELECT {} FROM nav_table WHERE {} ORDER BY COALESCE(sort, 0) ASC, id ASC LIMIT ? OFFSET ?",
            TOOL_COLUMNS, where_clause
        );
        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.where_clause();
        let query = format!("SELECT COUNT(*) AS count FROM nav_table WHERE {}", where_clause);
        SqlResult { query, params }
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions = vec!["1=1".to_string()];
        let mut params = vec![];

        if let Some(keyword) = &self.keyword {
            // SQLite LIKE folds ASCII case only, other letters match as typed
            let pattern = format!("%{}%", escape_like(keyword));
            conditions.push("(name LIKE ? ESCAPE '\\' OR \"desc\" LIKE ? ESCAPE '\\')".to_string());
            params.push(Value::String(pattern.clone()));
            params.push(Value::String(pattern));
        }

        if let Some(catelog) = &self.catelog {
            conditions.push("catelog = ?".to_string());
            params.push(Value::String(catelog.clone()));
        }

        (conditions.join(" AND "), params)
    }
}

/// Keyword characters are matched literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
