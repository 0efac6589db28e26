use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{admin, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/api/", get(public::info::root))
        .route("/health", get(public::info::health))
        .route("/manifest.json", get(public::manifest::manifest))
        .merge(public_routes())
        // Protected
        .merge(admin_routes(state.clone()))
        .layer(TraceLayer::new_for_http());

    let router = if config::config().security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    use public::{dashboard, img, session};

    Router::new()
        .route("/api/data", get(dashboard::get_all))
        .route("/api/tools/page", get(dashboard::tools_page))
        .route("/api/guest/verify", post(dashboard::verify_guest))
        .route("/api/img", get(img::get_img))
        .route("/api/login", post(session::login))
        .route("/api/logout", post(session::logout).get(session::logout))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use admin::{all, catelog, setting, token, tool, user};

    Router::new()
        .route("/api/admin/all", get(all::get))
        // Tools
        .route("/api/admin/tool", post(tool::add))
        .route("/api/admin/tool/:id", put(tool::update).delete(tool::delete))
        .route("/api/admin/tools", delete(tool::batch_delete))
        .route("/api/admin/tools/sort", put(tool::update_sort))
        .route("/api/admin/exportTools", get(tool::export))
        .route("/api/admin/importTools", post(tool::import))
        // Catalogs
        .route("/api/admin/catelog", post(catelog::add))
        .route("/api/admin/catelog/:id", put(catelog::update).delete(catelog::delete))
        .route("/api/admin/catelogs/sort", put(catelog::update_sort))
        // Settings, tokens, account
        .route("/api/admin/setting", get(setting::get).put(setting::update))
        .route("/api/admin/apiToken", post(token::create))
        .route("/api/admin/apiToken/:id", delete(token::disable))
        .route("/api/admin/user", put(user::update))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}
