use crate::error::{AdminError, ErrorResponse};
use crate::models::{PublishRequest, PublishResponse};
use crate::routes;
use crate::script::{published_script, ScriptMetadata};
use crate::state::AppState;
use crate::store::ScriptId;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};

/// POST /api/scripts/{script_id} handler - Create or overwrite a script
///
/// Requires an admin-prefixed key. The stored body gets a metadata header and
/// a `%KEY%` line that is filled in when the script is fetched. A request
/// without a JSON content type is read as an empty body, so it fails the key
/// check rather than the content negotiation.
#[utoipa::path(
    post,
    path = routes::SCRIPT_ITEM,
    params(
        ("script_id" = String, Path, description = "Identifier to create or overwrite")
    ),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Script stored", body = PublishResponse),
        (status = 400, description = "Invalid script id or malformed JSON body", body = ErrorResponse),
        (status = 401, description = "Invalid admin key", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "admin"
)]
pub async fn publish_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublishResponse>), AdminError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => PublishRequest::default(),
        Err(rejection) => {
            tracing::warn!("Rejected publish of {:?}: {}", raw_id, rejection.body_text());
            return Err(AdminError::InvalidRequest(rejection.body_text()));
        }
    };

    if !state.is_admin_key(request.key.as_deref()) {
        tracing::warn!("Rejected publish of {:?}: invalid admin key", raw_id);
        return Err(AdminError::InvalidAdminKey);
    }

    let id = ScriptId::parse(&raw_id).ok_or_else(|| AdminError::InvalidScriptId(raw_id.clone()))?;

    let meta = ScriptMetadata {
        name: request.name.as_deref(),
        author: request.author.as_deref(),
        version: request.version.as_deref(),
    };
    let content = published_script(
        id.as_str(),
        &request_hostname(&headers),
        &meta,
        request.code.as_deref(),
    );

    state.scripts.put(&id, &content).await.map_err(|e| {
        tracing::error!("Error creating script {}: {:#}", id, e);
        AdminError::WriteFailed(e)
    })?;

    tracing::info!("Successfully stored script {}", id);
    Ok((
        StatusCode::OK,
        Json(PublishResponse {
            success: true,
            message: "Script created/updated successfully".to_string(),
            script_url: routes::script_url(id.as_str()),
        }),
    ))
}

/// Host header without the port, `localhost` if absent.
fn request_hostname(headers: &HeaderMap) -> String {
    let Some(host) = headers.get(header::HOST).and_then(|h| h.to_str().ok()) else {
        return "localhost".to_string();
    };
    let hostname = if host.starts_with('[') {
        // IPv6 literal, keep the brackets
        host.split_once(']').map_or(host, |(addr, _)| &host[..=addr.len()])
    } else {
        host.split(':').next().unwrap_or(host)
    };
    if hostname.is_empty() {
        "localhost".to_string()
    } else {
        hostname.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_text, TestApp, ADMIN_KEY};
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_publish_then_fetch() {
        let app = TestApp::new().await;

        let response = app
            .post_json(
                "/api/scripts/demo",
                serde_json::json!({ "key": ADMIN_KEY, "code": "print(1)" }),
            )
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: PublishResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(body.success);
        assert_eq!(body.message, "Script created/updated successfully");
        assert_eq!(body.script_url, "/api/scripts/demo");

        let response = app.get("/api/scripts/demo?key=ADMIN_secret").await;
        assert_eq!(response.status(), StatusCode::OK);
        let script = body_text(response).await;
        assert!(script.contains("print(1)"));
        assert!(script.contains("-- Your key: ADMIN_secret"));
        assert!(script.contains("ID: demo"));
        assert!(script.contains("-- This script is hosted on scripts.example.com\n"));
    }

    #[tokio::test]
    async fn test_publish_response_uses_camel_case() {
        let app = TestApp::new().await;

        let response = app
            .post_json("/api/scripts/demo", serde_json::json!({ "key": ADMIN_KEY }))
            .await;

        let raw: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(raw["scriptUrl"], "/api/scripts/demo");
    }

    #[tokio::test]
    async fn test_publish_round_trip_preserves_code() {
        let app = TestApp::new().await;
        let code = "local t = {1, 2, 3}\nfor i, v in ipairs(t) do\n  print(i, v)\nend";

        app.post_json(
            "/api/scripts/loop",
            serde_json::json!({
                "key": ADMIN_KEY,
                "code": code,
                "name": "Loop",
                "author": "tester",
                "version": "0.2.0"
            }),
        )
        .await;

        let script = body_text(app.get("/api/scripts/loop?key=player").await).await;
        assert!(script.ends_with(code));
        assert!(script.contains("Script: Loop"));
        assert!(script.contains("Author: tester"));
        assert!(script.contains("Version: 0.2.0"));
    }

    #[tokio::test]
    async fn test_publish_defaults_for_missing_fields() {
        let app = TestApp::new().await;

        app.post_json("/api/scripts/empty", serde_json::json!({ "key": ADMIN_KEY }))
            .await;

        let stored = std::fs::read_to_string(app.scripts_dir.join("empty.lua")).unwrap();
        assert!(stored.contains("Script: Unnamed"));
        assert!(stored.contains("Author: Unknown"));
        assert!(stored.contains("Version: 1.0.0"));
        assert!(stored.ends_with("-- Empty script\nprint(\"Hello world!\")"));
    }

    #[tokio::test]
    async fn test_publish_overwrites() {
        let app = TestApp::new().await;

        for code in ["print('v1')", "print('v2')"] {
            let response = app
                .post_json(
                    "/api/scripts/demo",
                    serde_json::json!({ "key": ADMIN_KEY, "code": code }),
                )
                .await;
            assert_eq!(response.status(), StatusCode::OK);
        }

        let script = body_text(app.get("/api/scripts/demo?key=k").await).await;
        assert!(script.contains("print('v2')"));
        assert!(!script.contains("print('v1')"));
    }

    #[tokio::test]
    async fn test_publish_rejects_non_admin_key() {
        let app = TestApp::new().await;

        let response = app
            .post_json(
                "/api/scripts/demo",
                serde_json::json!({ "key": "user-key-1", "code": "print(1)" }),
            )
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(!body.success);
        assert_eq!(body.message, "Invalid admin key");
        assert!(!app.scripts_dir.join("demo.lua").exists());
    }

    #[tokio::test]
    async fn test_publish_rejects_missing_key() {
        let app = TestApp::new().await;

        let response = app
            .post_json("/api/scripts/demo", serde_json::json!({ "code": "print(1)" }))
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!app.scripts_dir.join("demo.lua").exists());
    }

    #[tokio::test]
    async fn test_publish_non_json_body_is_missing_key() {
        let app = TestApp::new().await;

        let response = app
            .post_raw(
                "/api/scripts/demo",
                Some("application/x-www-form-urlencoded"),
                "key=nope",
            )
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(!body.success);
        assert_eq!(body.message, "Invalid admin key");

        let response = app.post_raw("/api/scripts/demo", None, "").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body.message, "Invalid admin key");

        assert!(!app.scripts_dir.join("demo.lua").exists());
    }

    #[tokio::test]
    async fn test_publish_malformed_json_body() {
        let app = TestApp::new().await;

        let response = app
            .post_raw("/api/scripts/demo", Some("application/json"), "{invalid json}")
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(!body.success);
        assert!(!body.message.is_empty());
        assert!(!app.scripts_dir.join("demo.lua").exists());
    }

    #[tokio::test]
    async fn test_publish_rejects_bad_id() {
        let app = TestApp::new().await;

        let response = app
            .post_json(
                "/api/scripts/..%2Fescape",
                serde_json::json!({ "key": ADMIN_KEY, "code": "print(1)" }),
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body.message, "Invalid script id: ../escape");
        assert!(!app.scripts_dir.join("..").join("escape.lua").exists());
    }

    #[tokio::test]
    async fn test_publish_write_failure() {
        let app = TestApp::new().await;
        std::fs::remove_dir_all(&app.scripts_dir).unwrap();

        let response = app
            .post_json("/api/scripts/demo", serde_json::json!({ "key": ADMIN_KEY }))
            .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert!(body.message.starts_with("Error creating script: "));
    }

    #[test]
    fn test_request_hostname() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_hostname(&headers), "localhost");

        headers.insert(header::HOST, HeaderValue::from_static("example.com:8080"));
        assert_eq!(request_hostname(&headers), "example.com");

        headers.insert(header::HOST, HeaderValue::from_static("example.com"));
        assert_eq!(request_hostname(&headers), "example.com");

        headers.insert(header::HOST, HeaderValue::from_static("[::1]:3000"));
        assert_eq!(request_hostname(&headers), "[::1]");
    }
}
