use axum::{
    extract::{RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::services::LogoResponse;
use crate::state::AppState;

/// GET /api/img?url= - cached logo bytes or a redirect to the source
pub async fn get_img(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Result<Response, ApiError> {
    let url = logo_url_from_query(raw.as_deref().unwrap_or_default());
    if url.is_empty() {
        return Err(ApiError::bad_request("url parameter is required"));
    }

    let response = match state.imgs.resolve(&url).await {
        LogoResponse::Redirect(target) => (StatusCode::FOUND, [(header::LOCATION, target)]).into_response(),
        LogoResponse::Image { content_type, bytes } => {
            ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
        }
    };
    Ok(response)
}

/// Clients often forget to escape the logo URL, so `&` inside it ends up
/// splitting the query. Everything after `url=` wins when it is longer than
/// the properly parsed value.
fn logo_url_from_query(raw: &str) -> String {
    let parsed = url::form_urlencoded::parse(raw.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    let Some(idx) = raw.find("url=") else {
        return parsed;
    };
    let candidate = raw[idx + 4..].replace('&', "%26");
    let decoded = url::form_urlencoded::parse(format!("url={}", candidate).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    if decoded.len() > parsed.len() {
        decoded
    } else {
        parsed
    }
}
