use crate::error::{AdminError, ErrorResponse};
use crate::models::{KeyQuery, ListResponse, ScriptSummaryResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

/// GET /api/scripts handler - List stored scripts (admin)
///
/// Entries are sorted by id; timestamps are RFC 3339.
#[utoipa::path(
    get,
    path = routes::SCRIPTS,
    params(KeyQuery),
    responses(
        (status = 200, description = "Stored scripts", body = ListResponse),
        (status = 401, description = "Invalid admin key", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<ListResponse>), AdminError> {
    let Query(query) = query?;
    if !state.is_admin_key(query.key.as_deref()) {
        tracing::warn!("Rejected script listing: invalid admin key");
        return Err(AdminError::InvalidAdminKey);
    }

    let scripts = state.scripts.list().await.map_err(|e| {
        tracing::error!("Error listing scripts: {:#}", e);
        AdminError::ListFailed(e)
    })?;

    let scripts: Vec<ScriptSummaryResponse> = scripts
        .into_iter()
        .map(|s| ScriptSummaryResponse {
            script_url: routes::script_url(s.id.as_str()),
            id: s.id.to_string(),
            size_bytes: s.size_bytes,
            updated_at: s.updated_at.to_rfc3339(),
        })
        .collect();

    tracing::info!("Listed {} scripts", scripts.len());
    Ok((StatusCode::OK, Json(ListResponse { scripts })))
}
