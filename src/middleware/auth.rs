use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims, TokenKind};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// User id for sessions, token id for API tokens
    pub id: i64,
    pub name: String,
    pub kind: TokenKind,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            kind: claims.kind,
        }
    }
}

/// Rejects requests without a valid admin session or enabled API token
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(request.headers()).map_err(ApiError::unauthorized)?;
    let auth_user = authenticate(&state, &token).await?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

/// Admin identity for routes where logging in is optional. Any failure
/// means "anonymous".
pub async fn optional_admin(state: &AppState, headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_jwt_from_headers(headers).ok()?;
    authenticate(state, &token).await.ok()
}

async fn authenticate(state: &AppState, token: &str) -> Result<AuthUser, ApiError> {
    let claims = validate_jwt(token)?;
    if claims.kind == TokenKind::Api && !state.tokens.is_enabled(claims.sub).await {
        tracing::warn!("Rejected revoked API token {}", claims.sub);
        return Err(ApiError::unauthorized("API token has been revoked"));
    }
    Ok(AuthUser::from(claims))
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
