// Route path constants - single source of truth for all API paths

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const ROOT: &str = "/";
pub const VERIFY: &str = "/api/verify";
pub const SCRIPTS: &str = "/api/scripts";
pub const SCRIPT_ITEM: &str = "/api/scripts/{script_id}";
pub const SCRIPT_CUSTOM: &str = "/api/scripts/custom";
pub const SCRIPT_LOADER: &str = "/api/scripts/loader";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Retrieval path for a published script
pub fn script_url(id: &str) -> String {
    format!("{}/{}", SCRIPTS, id)
}

/// Full application router. Static segments (`custom`, `loader`) win over
/// the `{script_id}` capture; anything unmatched falls through to the
/// public directory.
pub fn router(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    Router::new()
        .route(ROOT, get(handlers::root_handler))
        .route(VERIFY, get(handlers::verify_handler))
        .route(SCRIPTS, get(handlers::list_handler))
        .route(SCRIPT_CUSTOM, get(handlers::custom_handler))
        .route(SCRIPT_LOADER, get(handlers::loader_handler))
        .route(
            SCRIPT_ITEM,
            get(handlers::fetch_handler).post(handlers::publish_handler),
        )
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
