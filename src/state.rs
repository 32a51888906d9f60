use crate::config::Config;
use crate::error::ScriptError;
use crate::keys::KeyStore;
use crate::store::ScriptStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub keys: Arc<KeyStore>,
    pub scripts: Arc<dyn ScriptStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, keys: KeyStore, scripts: Arc<dyn ScriptStore>) -> Self {
        Self {
            keys: Arc::new(keys),
            scripts,
            config: Arc::new(config),
        }
    }

    pub fn is_admin_key(&self, key: Option<&str>) -> bool {
        key.is_some_and(|k| k.starts_with(&self.config.admin_key_prefix))
    }

    /// Gate for the script-serving endpoints: a non-empty key is required,
    /// and it must verify against the key store when enforcement is on.
    pub fn require_serving_key(&self, key: Option<String>) -> Result<String, ScriptError> {
        let key = key.filter(|k| !k.is_empty()).ok_or(ScriptError::MissingKey)?;
        if self.config.enforce_key_verification && !self.keys.verify(Some(&key)).is_valid() {
            tracing::warn!("Rejected unverified key on script endpoint");
            return Err(ScriptError::InvalidKey);
        }
        Ok(key)
    }
}
