use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;

use crate::database::models::ApiToken;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTokenBody {
    #[serde(default)]
    pub name: String,
}

/// POST /api/admin/apiToken
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTokenBody>, JsonRejection>,
) -> ApiResult<ApiToken> {
    let Json(body) = payload?;
    Ok(ApiResponse::success(state.tokens.create(&body.name).await?))
}

/// DELETE /api/admin/apiToken/:id - revokes; the row is kept
pub async fn disable(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.tokens.disable(id).await?;
    Ok(ApiResponse::message("API token revoked"))
}
