use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /manifest.json - PWA manifest built from the current settings
pub async fn manifest(State(state): State<AppState>) -> Json<Value> {
    let setting = state.settings.load().await;

    let title = non_empty(setting.title, "Van Nav");
    let logo192 = non_empty(setting.logo192, "logo192.png");
    let logo512 = non_empty(setting.logo512, "logo512.png");

    Json(json!({
        "short_name": title,
        "name": title,
        "icons": [
            { "src": logo192, "type": "image/png", "sizes": "192x192" },
            { "src": logo512, "type": "image/png", "sizes": "512x512" }
        ],
        "start_url": "/",
        "display": "standalone",
        "scope": "/",
        "theme_color": "#000000",
        "background_color": "#ffffff"
    }))
}

fn non_empty(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
