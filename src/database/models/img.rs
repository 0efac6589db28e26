use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cached logo. `value` is a base64 payload, or a plain URL for rows
/// inserted by hand or by older releases.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Img {
    pub id: i64,
    pub url: String,
    pub value: String,
}
