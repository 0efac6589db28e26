use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::config;
use crate::error::ApiError;
use crate::filter::PageRequest;
use crate::middleware::{optional_admin, ApiResponse, ApiResult};
use crate::services::{DashboardView, ToolPage, GUEST_COOKIE_NAME};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub catelog: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyGuestBody {
    #[serde(default)]
    pub password: String,
}

/// GET /api/data - everything the dashboard renders
pub async fn get_all(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<DashboardView> {
    let is_admin = optional_admin(&state, &headers).await.is_some();
    let cookie = read_cookie(&headers, GUEST_COOKIE_NAME);
    let view = state.dashboard.get_all(cookie.as_deref(), is_admin).await;
    Ok(ApiResponse::success(view))
}

/// GET /api/tools/page?page&size&q&catelog
pub async fn tools_page(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<ToolPage> {
    let Query(query) = query?;
    let req = PageRequest::clamp(
        parse_lenient(query.page.as_deref()),
        parse_lenient(query.size.as_deref()),
        &config::config().pagination,
    );
    let page = state.tools.page(req, &query.q, &query.catelog).await;
    Ok(ApiResponse::success(page))
}

/// Empty or non-numeric paging values fall back to the defaults
fn parse_lenient(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse().ok())
}

/// POST /api/guest/verify - exchanges the guest password for a cookie
pub async fn verify_guest(
    State(state): State<AppState>,
    payload: Result<Json<VerifyGuestBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let result = state.guest_lock.verify(&body.password).await;
    if !result.granted {
        return Err(ApiError::unauthorized("Wrong guest password"));
    }

    let mut response = ApiResponse::message("Guest access granted").into_response();
    if let Some(cookie) = result.cookie {
        let value = HeaderValue::from_str(&cookie.to_header_value())
            .map_err(|e| ApiError::internal_server_error(format!("Invalid cookie header: {}", e)))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Value of a named cookie from the request's `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; guest_authorized=abc123"));
        assert_eq!(read_cookie(&headers, GUEST_COOKIE_NAME).as_deref(), Some("abc123"));
        assert_eq!(read_cookie(&headers, "missing"), None);
        assert_eq!(read_cookie(&HeaderMap::new(), GUEST_COOKIE_NAME), None);
    }

    #[test]
    fn paging_values_parse_leniently() {
        assert_eq!(parse_lenient(Some("3")), Some(3));
        assert_eq!(parse_lenient(Some(" 7 ")), Some(7));
        assert_eq!(parse_lenient(Some("")), None);
        assert_eq!(parse_lenient(Some("abc")), None);
        assert_eq!(parse_lenient(None), None);
    }
}
