use crate::models::{KeyQuery, VerifyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

/// GET /api/verify handler - Check a key against the key store
///
/// An absent, unknown or used key is a negative 200 result, not an error.
/// Only an undecodable query string gets a 400.
#[utoipa::path(
    get,
    path = routes::VERIFY,
    params(KeyQuery),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Malformed query string", body = VerifyResponse)
    ),
    tag = "keys"
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> (StatusCode, Json<VerifyResponse>) {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::warn!("Rejected verification query: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(VerifyResponse {
                    valid: false,
                    message: rejection.body_text(),
                }),
            );
        }
    };

    let outcome = state.keys.verify(query.key.as_deref());
    tracing::info!("Key verification: {:?}", outcome);

    (
        StatusCode::OK,
        Json(VerifyResponse {
            valid: outcome.is_valid(),
            message: outcome.message().to_string(),
        }),
    )
}
