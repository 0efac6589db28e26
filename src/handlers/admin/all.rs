use axum::extract::{Extension, State};

use crate::auth::TokenKind;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::AdminView;
use crate::state::AppState;

/// GET /api/admin/all - unfiltered dashboard plus tokens and the caller
pub async fn get(State(state): State<AppState>, Extension(auth_user): Extension<AuthUser>) -> ApiResult<AdminView> {
    let user = match auth_user.kind {
        TokenKind::Session => state.users.find(auth_user.id).await.unwrap_or_else(|e| {
            tracing::error!("Failed to load user {}: {}", auth_user.id, e);
            None
        }),
        TokenKind::Api => None,
    };
    Ok(ApiResponse::success(state.dashboard.get_admin_all(user).await))
}
