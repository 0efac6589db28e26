use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// API token. Deleting one only flips `disabled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub value: String,
    pub disabled: bool,
}

#[derive(Debug, FromRow)]
pub struct TokenRow {
    pub id: i64,
    pub name: Option<String>,
    pub value: Option<String>,
    pub disabled: Option<bool>,
}

impl From<TokenRow> for ApiToken {
    fn from(row: TokenRow) -> Self {
        Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            value: row.value.unwrap_or_default(),
            disabled: row.disabled.unwrap_or(false),
        }
    }
}
