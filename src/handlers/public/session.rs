use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::LoginResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/login - `{user, token}` for valid admin credentials
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginBody>, JsonRejection>,
) -> ApiResult<LoginResult> {
    let Json(body) = payload?;
    let result = state.users.login(&body.name, &body.password).await?;
    Ok(ApiResponse::success(result))
}

/// POST /api/logout - sessions are stateless; the client drops its token
pub async fn logout() -> ApiResult<()> {
    Ok(ApiResponse::message("Logged out"))
}
