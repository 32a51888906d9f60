use crate::error::ScriptError;
use crate::models::KeyQuery;
use crate::routes;
use crate::script::substitute_key;
use crate::state::AppState;
use axum::{extract::rejection::QueryRejection, extract::Query, extract::State};
use std::io::ErrorKind;

/// GET /api/scripts/loader handler - Serve the bootstrap document
///
/// The loader file is re-read on every request so it can be edited in place.
#[utoipa::path(
    get,
    path = routes::SCRIPT_LOADER,
    params(KeyQuery),
    responses(
        (status = 200, description = "Loader body", body = String, content_type = "text/plain"),
        (status = 401, description = "No key provided", body = String, content_type = "text/plain"),
        (status = 404, description = "Loader not found", body = String, content_type = "text/plain")
    ),
    tag = "scripts"
)]
pub async fn loader_handler(
    State(state): State<AppState>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<String, ScriptError> {
    let Query(query) = query?;
    let key = state.require_serving_key(query.key)?;

    let path = &state.config.loader_path;
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Loader not found at {}", path.display());
            return Err(ScriptError::LoaderNotFound);
        }
        Err(e) => {
            let err = anyhow::Error::new(e).context(format!("read loader: {}", path.display()));
            return Err(ScriptError::Storage(err));
        }
    };

    tracing::info!("Serving loader");
    Ok(substitute_key(&content, &key))
}
