use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named group of tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catelog {
    pub id: i64,
    pub name: String,
    pub sort: i64,
    pub hide: bool,
}

#[derive(Debug, FromRow)]
pub struct CatelogRow {
    pub id: i64,
    pub name: Option<String>,
    pub sort: Option<i64>,
    pub hide: Option<bool>,
}

impl From<CatelogRow> for Catelog {
    fn from(row: CatelogRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            sort: row.sort.unwrap_or(0),
            hide: row.hide.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatelogInput {
    pub name: String,
    pub sort: i64,
    pub hide: bool,
}
