mod api_doc;
mod config;
mod error;
mod handlers;
mod keys;
mod models;
mod routes;
mod script;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use keys::KeyStore;
use state::AppState;
use std::sync::Arc;
use store::FileScriptStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real env vars still apply.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("script-server starting");

    let config = Config::from_env()?;
    config.log_startup();

    let keys = KeyStore::load_or_empty(&config.keys_path);
    let scripts = FileScriptStore::open(&config.scripts_dir).await?;
    tracing::info!("Script repository ready at {}", scripts.dir().display());

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState::new(config, keys, Arc::new(scripts));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    tracing::info!("Server is running on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("script-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
