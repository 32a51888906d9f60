//! Shared fixtures for handler tests.

use crate::config::Config;
use crate::keys::{KeyRecord, KeyStore};
use crate::routes;
use crate::state::AppState;
use crate::store::FileScriptStore;
use axum::{body::Body, http::Request, response::Response, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_KEY: &str = "ADMIN_secret";
pub const USER_KEY: &str = "user-key-1";
pub const USED_KEY: &str = "spent-key";

pub struct TestApp {
    pub router: Router,
    pub scripts_dir: PathBuf,
    pub loader_path: PathBuf,
    // Keeps the temp directory alive for the test's duration
    _root: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_enforcement(false).await
    }

    pub async fn with_enforcement(enforce_key_verification: bool) -> Self {
        let root = TempDir::new().unwrap();
        let scripts_dir = root.path().join("scripts");
        let loader_path = root.path().join("loader.lua");

        let config = Config {
            service_port: 3000,
            service_host: "0.0.0.0".to_string(),
            keys_path: root.path().join("keys.json"),
            scripts_dir: scripts_dir.clone(),
            loader_path: loader_path.clone(),
            public_dir: root.path().join("public"),
            admin_key_prefix: "ADMIN_".to_string(),
            enforce_key_verification,
        };

        let keys = KeyStore::new(vec![
            KeyRecord { key: USER_KEY.to_string(), used: false },
            KeyRecord { key: USED_KEY.to_string(), used: true },
        ]);

        let store = FileScriptStore::open(&scripts_dir).await.unwrap();
        let state = AppState::new(config, keys, Arc::new(store));

        Self {
            router: routes::router(state),
            scripts_dir,
            loader_path,
            _root: root,
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response {
        let body = serde_json::to_string(&body).unwrap();
        self.post_raw(uri, Some("application/json"), &body).await
    }

    pub async fn post_raw(&self, uri: &str, content_type: Option<&str>, body: &str) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("host", "scripts.example.com:3000");
        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }
}

pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}
