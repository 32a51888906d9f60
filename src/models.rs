use serde::{Deserialize, Serialize};

/// Query parameters carrying a caller key
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct KeyQuery {
    pub key: Option<String>,
}

/// Query parameters for the custom inline script endpoint
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomScriptQuery {
    pub key: Option<String>,
    /// Percent-encoded code fragment
    pub code: Option<String>,
}

/// Response type for key verification
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub message: String,
}

/// Request body for publishing a script
#[derive(Serialize, Deserialize, Default, utoipa::ToSchema)]
pub struct PublishRequest {
    pub key: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
}

/// Response type for a successful publish
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    pub message: String,
    pub script_url: String,
}

/// Response type for the script listing endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListResponse {
    pub scripts: Vec<ScriptSummaryResponse>,
}

/// Individual entry in the script listing
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScriptSummaryResponse {
    pub id: String,
    pub size_bytes: u64,
    pub updated_at: String,
    pub script_url: String,
}
