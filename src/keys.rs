use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single entry of the key file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub key: String,
    #[serde(default)]
    pub used: bool,
}

/// Outcome of checking a candidate key against the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Valid,
    Missing,
    InvalidOrUsed,
}

impl Verification {
    pub fn is_valid(self) -> bool {
        self == Verification::Valid
    }

    pub fn message(self) -> &'static str {
        match self {
            Verification::Valid => "Key is valid",
            Verification::Missing => "No key provided",
            Verification::InvalidOrUsed => "Invalid or used key",
        }
    }
}

/// Immutable snapshot of the key file, loaded once at startup.
///
/// Records are never mutated or written back; the `used` flag is only read.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    records: Vec<KeyRecord>,
}

impl KeyStore {
    pub fn new(records: Vec<KeyRecord>) -> Self {
        Self { records }
    }

    /// Parse a key file. A missing file yields an empty store.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read key file: {}", path.display()))?;
        let records: Vec<KeyRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("parse key file: {}", path.display()))?;
        Ok(Self::new(records))
    }

    /// Startup loader: any failure is logged and an empty store is used instead.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!("Key file {} not found, no keys will verify", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(store) => {
                if store.is_empty() {
                    tracing::warn!("Key file {} contains no keys", path.display());
                } else {
                    tracing::info!("Loaded {} key record(s) from {}", store.len(), path.display());
                }
                store
            }
            Err(e) => {
                tracing::error!("Error loading keys: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn verify(&self, candidate: Option<&str>) -> Verification {
        let Some(candidate) = candidate.filter(|k| !k.is_empty()) else {
            return Verification::Missing;
        };
        if self.records.iter().any(|r| r.key == candidate && !r.used) {
            Verification::Valid
        } else {
            Verification::InvalidOrUsed
        }
    }
}
