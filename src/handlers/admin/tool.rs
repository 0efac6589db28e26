use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::database::models::{SortUpdate, Tool, ToolInput};
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::DeleteReport;
use crate::state::AppState;

/// POST /api/admin/tool
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<ToolInput>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(input) = payload?;
    let id = state.tools.add(&input).await?;
    if input.logo.is_empty() {
        state.logo_jobs.spawn(&input.url, id);
    }
    Ok(ApiResponse::success(json!({ "id": id })))
}

/// PUT /api/admin/tool/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ToolInput>, JsonRejection>,
) -> ApiResult<()> {
    let Json(input) = payload?;
    state.tools.update(id, &input).await?;
    if input.logo.is_empty() {
        state.logo_jobs.spawn(&input.url, id);
    }
    Ok(ApiResponse::message("Tool updated"))
}

/// DELETE /api/admin/tool/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<DeleteReport> {
    Ok(ApiResponse::success(state.tools.delete(id).await?))
}

/// DELETE /api/admin/tools - body is a JSON array of ids
pub async fn batch_delete(
    State(state): State<AppState>,
    payload: Result<Json<Vec<i64>>, JsonRejection>,
) -> ApiResult<DeleteReport> {
    let Json(ids) = payload?;
    Ok(ApiResponse::success(state.tools.batch_delete(&ids).await?))
}

/// PUT /api/admin/tools/sort
pub async fn update_sort(
    State(state): State<AppState>,
    payload: Result<Json<Vec<SortUpdate>>, JsonRejection>,
) -> ApiResult<()> {
    let Json(updates) = payload?;
    state.tools.update_sort(&updates).await?;
    Ok(ApiResponse::message("Tool order updated"))
}

/// GET /api/admin/exportTools
pub async fn export(State(state): State<AppState>) -> ApiResult<Vec<Tool>> {
    Ok(ApiResponse::success(state.tools.list_all().await?))
}

/// POST /api/admin/importTools - accepts the export format; ids are ignored
pub async fn import(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ToolInput>>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(tools) = payload?;
    let imported = state.tools.import(&tools).await?;
    Ok(ApiResponse::success(json!({ "imported": imported })))
}
