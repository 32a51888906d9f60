use crate::error::ScriptError;
use crate::models::CustomScriptQuery;
use crate::routes;
use crate::script::{custom_script, is_well_formed_escapes};
use crate::state::AppState;
use axum::{extract::rejection::QueryRejection, extract::Query, extract::State};

/// GET /api/scripts/custom handler - Wrap an ad-hoc code fragment
///
/// `code` is percent-decoded once more after the query string itself has
/// been decoded, so clients may send it double-encoded.
#[utoipa::path(
    get,
    path = routes::SCRIPT_CUSTOM,
    params(CustomScriptQuery),
    responses(
        (status = 200, description = "Synthesized script", body = String, content_type = "text/plain"),
        (status = 400, description = "No code provided or invalid encoding", body = String, content_type = "text/plain"),
        (status = 401, description = "No key provided", body = String, content_type = "text/plain")
    ),
    tag = "scripts"
)]
pub async fn custom_handler(
    State(state): State<AppState>,
    query: Result<Query<CustomScriptQuery>, QueryRejection>,
) -> Result<String, ScriptError> {
    let Query(query) = query?;
    let key = state.require_serving_key(query.key)?;

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or(ScriptError::MissingCode)?;
    if !is_well_formed_escapes(&code) {
        tracing::warn!("Custom script code has a malformed percent escape");
        return Err(ScriptError::InvalidCodeEncoding);
    }
    let code = urlencoding::decode(&code).map_err(|e| {
        tracing::warn!("Custom script code is not valid percent-encoding: {}", e);
        ScriptError::InvalidCodeEncoding
    })?;

    tracing::info!("Serving custom script ({} bytes)", code.len());
    Ok(custom_script(&key, &code))
}
