use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserBody {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// PUT /api/admin/user
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<UpdateUserBody>, JsonRejection>,
) -> ApiResult<()> {
    let Json(body) = payload?;
    state.users.update(body.id, &body.name, &body.password).await?;
    Ok(ApiResponse::message("User updated"))
}
