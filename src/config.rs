use std::env;
use std::path::PathBuf;
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub keys_path: PathBuf,
    pub scripts_dir: PathBuf,
    pub loader_path: PathBuf,
    pub public_dir: PathBuf,
    pub admin_key_prefix: String,
    pub enforce_key_verification: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let service_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let keys_path = path_var("KEYS_PATH", "keys.json");
        let scripts_dir = path_var("SCRIPTS_DIR", "scripts");
        let loader_path = path_var("LOADER_PATH", "loader.lua");
        let public_dir = path_var("PUBLIC_DIR", "public");

        let admin_key_prefix = env::var("ADMIN_KEY_PREFIX")
            .unwrap_or_else(|_| "ADMIN_".to_string());
        if admin_key_prefix.is_empty() {
            bail!("ADMIN_KEY_PREFIX must not be empty");
        }

        let enforce_key_verification = match env::var("ENFORCE_KEY_VERIFICATION") {
            Ok(v) => parse_flag(&v)
                .context("ENFORCE_KEY_VERIFICATION must be one of: true, false, 1, 0")?,
            Err(_) => false,
        };

        Ok(Config {
            service_port,
            service_host,
            keys_path,
            scripts_dir,
            loader_path,
            public_dir,
            admin_key_prefix,
            enforce_key_verification,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Key file: {}", self.keys_path.display());
        tracing::info!("  Scripts directory: {}", self.scripts_dir.display());
        tracing::info!("  Loader: {}", self.loader_path.display());
        tracing::info!("  Static files: {}", self.public_dir.display());
        tracing::info!("  Key verification on script endpoints: {}",
            if self.enforce_key_verification { "enforced" } else { "disabled (any key accepted)" });
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("unrecognized boolean '{}'", other),
    }
}
