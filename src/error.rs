use axum::{
    extract::rejection::QueryRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// JSON failure envelope for admin endpoints
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// Errors from the script-serving endpoints.
///
/// These render as a single plain-text line prefixed with `-- ` so a client
/// that blindly executes the body runs a comment instead of garbage.
#[derive(Debug)]
pub enum ScriptError {
    /// `key` query parameter absent or empty
    MissingKey,
    /// Key rejected by the key store (only when verification is enforced)
    InvalidKey,
    /// `code` query parameter absent or empty
    MissingCode,
    /// `code` is not valid percent-encoding
    InvalidCodeEncoding,
    /// No stored script for the requested id
    ScriptNotFound(String),
    /// Bootstrap document missing
    LoaderNotFound,
    /// Query string could not be deserialized
    InvalidQuery(String),
    /// Storage read error
    Storage(anyhow::Error),
}

impl IntoResponse for ScriptError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ScriptError::MissingKey => (StatusCode::UNAUTHORIZED, "No key provided".to_string()),
            ScriptError::InvalidKey => (StatusCode::UNAUTHORIZED, "Invalid or used key".to_string()),
            ScriptError::MissingCode => (StatusCode::BAD_REQUEST, "No code provided".to_string()),
            ScriptError::InvalidCodeEncoding => {
                (StatusCode::BAD_REQUEST, "Invalid code encoding".to_string())
            }
            ScriptError::ScriptNotFound(id) => {
                tracing::debug!("Script not found: {}", id);
                (StatusCode::NOT_FOUND, "Script not found".to_string())
            }
            ScriptError::LoaderNotFound => (StatusCode::NOT_FOUND, "Loader not found".to_string()),
            ScriptError::InvalidQuery(detail) => (StatusCode::BAD_REQUEST, single_line(&detail)),
            ScriptError::Storage(err) => {
                tracing::error!("Storage error while serving script: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Error reading script".to_string())
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("-- {}", message),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ScriptError {
    fn from(err: anyhow::Error) -> Self {
        ScriptError::Storage(err)
    }
}

impl From<QueryRejection> for ScriptError {
    fn from(rejection: QueryRejection) -> Self {
        ScriptError::InvalidQuery(rejection.body_text())
    }
}

// A multi-line message would break out of the `-- ` comment.
fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Errors from the admin (JSON) endpoints
#[derive(Debug)]
pub enum AdminError {
    /// Key missing or lacking the admin prefix
    InvalidAdminKey,
    /// Identifier cannot name a stored script
    InvalidScriptId(String),
    /// Query string or request body could not be deserialized
    InvalidRequest(String),
    /// Storage write failed during publish
    WriteFailed(anyhow::Error),
    /// Storage listing failed
    ListFailed(anyhow::Error),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminError::InvalidAdminKey => (
                StatusCode::UNAUTHORIZED,
                "Invalid admin key".to_string(),
            ),
            AdminError::InvalidScriptId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid script id: {}", id),
            ),
            AdminError::InvalidRequest(detail) => (
                StatusCode::BAD_REQUEST,
                detail,
            ),
            AdminError::WriteFailed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error creating script: {:#}", err),
            ),
            AdminError::ListFailed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error listing scripts: {:#}", err),
            ),
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });

        (status, body).into_response()
    }
}

impl From<QueryRejection> for AdminError {
    fn from(rejection: QueryRejection) -> Self {
        AdminError::InvalidRequest(rejection.body_text())
    }
}
