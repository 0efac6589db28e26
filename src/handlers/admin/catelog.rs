use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{CatelogInput, SortUpdate};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/admin/catelog
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<CatelogInput>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    let id = state.catelogs.add(&input).await?;
    Ok(ApiResponse::success(json!({ "id": id })))
}

/// PUT /api/admin/catelog/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CatelogInput>, JsonRejection>,
) -> ApiResult<()> {
    let Json(input) = payload?;
    state.catelogs.update(id, &input).await?;
    Ok(ApiResponse::message("Catalog updated"))
}

/// DELETE /api/admin/catelog/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Value> {
    let deleted = state.catelogs.delete(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": deleted })))
}

/// PUT /api/admin/catelogs/sort
pub async fn update_sort(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SortUpdate>>, JsonRejection>,
) -> ApiResult<()> {
    let Json(updates) = payload?;
    state.catelogs.update_sort(&updates).await?;
    Ok(ApiResponse::message("Catalog order updated"))
}
