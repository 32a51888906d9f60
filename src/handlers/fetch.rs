use crate::error::ScriptError;
use crate::models::KeyQuery;
use crate::routes;
use crate::script::substitute_key;
use crate::state::AppState;
use crate::store::ScriptId;
use axum::{extract::rejection::QueryRejection, extract::Path, extract::Query, extract::State};

/// GET /api/scripts/{script_id} handler - Serve a stored script
///
/// The first `%KEY%` in the stored body is replaced by the caller's key.
#[utoipa::path(
    get,
    path = routes::SCRIPT_ITEM,
    params(
        ("script_id" = String, Path, description = "Identifier of the stored script"),
        KeyQuery
    ),
    responses(
        (status = 200, description = "Script body", body = String, content_type = "text/plain"),
        (status = 401, description = "No key provided", body = String, content_type = "text/plain"),
        (status = 404, description = "Script not found", body = String, content_type = "text/plain")
    ),
    tag = "scripts"
)]
pub async fn fetch_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<String, ScriptError> {
    let Query(query) = query?;
    let key = state.require_serving_key(query.key)?;

    let Some(id) = ScriptId::parse(&raw_id) else {
        tracing::info!("Rejected fetch for malformed script id: {:?}", raw_id);
        return Err(ScriptError::ScriptNotFound(raw_id));
    };

    match state.scripts.get(&id).await? {
        Some(content) => {
            tracing::info!("Serving script {}", id);
            Ok(substitute_key(&content, &key))
        }
        None => {
            tracing::info!("Script not found: {}", id);
            Err(ScriptError::ScriptNotFound(raw_id))
        }
    }
}
