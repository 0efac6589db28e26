use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::database::models::Setting;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/admin/setting - guest password comes back masked
pub async fn get(State(state): State<AppState>) -> ApiResult<Setting> {
    Ok(ApiResponse::success(state.settings.load().await))
}

/// PUT /api/admin/setting - send the mask back to keep the guest password
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<Setting>, JsonRejection>,
) -> ApiResult<()> {
    let Json(setting) = payload?;
    state.settings.save(&setting).await?;
    Ok(ApiResponse::message("Settings updated"))
}
