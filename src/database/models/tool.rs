use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored link shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub logo: String,
    pub catelog: String,
    pub desc: String,
    pub sort: i64,
    pub hide: bool,
}

/// Raw `nav_table` row. Rows written by older releases may carry NULL in
/// any column, `hide` and `sort` included.
#[derive(Debug, FromRow)]
pub struct ToolRow {
    pub id: i64,
    pub name: Option<String>,
    pub url: Option<String>,
    pub logo: Option<String>,
    pub catelog: Option<String>,
    pub desc: Option<String>,
    pub sort: Option<i64>,
    pub hide: Option<bool>,
}

impl From<ToolRow> for Tool {
    fn from(row: ToolRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            url: row.url.unwrap_or_default(),
            logo: row.logo.unwrap_or_default(),
            catelog: row.catelog.unwrap_or_default(),
            desc: row.desc.unwrap_or_default(),
            sort: row.sort.unwrap_or(0),
            hide: row.hide.unwrap_or(false),
        }
    }
}

/// Payload for creating or replacing a tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolInput {
    pub name: String,
    pub url: String,
    pub logo: String,
    pub catelog: String,
    pub desc: String,
    pub sort: i64,
    pub hide: bool,
}

impl From<Tool> for ToolInput {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name,
            url: tool.url,
            logo: tool.logo,
            catelog: tool.catelog,
            desc: tool.desc,
            sort: tool.sort,
            hide: tool.hide,
        }
    }
}

/// One entry of a bulk reorder request, shared by tools and catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortUpdate {
    pub id: i64,
    pub sort: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_coerce_to_defaults() {
        let row = ToolRow {
            id: 7,
            name: Some("Rust".to_string()),
            url: Some("https://www.rust-lang.org".to_string()),
            logo: None,
            catelog: None,
            desc: None,
            sort: None,
            hide: None,
        };
        let tool = Tool::from(row);
        assert_eq!(tool.sort, 0);
        assert!(!tool.hide);
        assert_eq!(tool.logo, "");
        assert_eq!(tool.catelog, "");
    }

    #[test]
    fn input_accepts_partial_json() {
        let input: ToolInput = serde_json::from_str(r#"{"name":"a","url":"https://a","catelog":"dev"}"#).unwrap();
        assert_eq!(input.sort, 0);
        assert!(!input.hide);
        assert!(input.logo.is_empty());
    }
}
