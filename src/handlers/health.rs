use crate::routes;

pub const LIVENESS_MESSAGE: &str = "Script Server is running!";

/// GET / handler - Liveness check
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Server is up", body = String, content_type = "text/plain")
    ),
    tag = "health"
)]
pub async fn root_handler() -> &'static str {
    tracing::debug!("Liveness check");
    LIVENESS_MESSAGE
}
