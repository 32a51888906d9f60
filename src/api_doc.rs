use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{
    ListResponse, PublishRequest, PublishResponse, ScriptSummaryResponse, VerifyResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "script-server API",
        version = "1.0.0",
        description = "Serves stored scripts to key holders and lets admins publish them"
    ),
    paths(
        handlers::health::root_handler,
        handlers::verify::verify_handler,
        handlers::fetch::fetch_handler,
        handlers::custom::custom_handler,
        handlers::loader::loader_handler,
        handlers::publish::publish_handler,
        handlers::list::list_handler
    ),
    components(
        schemas(
            VerifyResponse,
            PublishRequest,
            PublishResponse,
            ListResponse,
            ScriptSummaryResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "keys", description = "Key verification"),
        (name = "scripts", description = "Script delivery"),
        (name = "admin", description = "Script publishing and listing")
    )
)]
pub struct ApiDoc;
