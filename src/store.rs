use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SCRIPT_EXTENSION: &str = "lua";
const MAX_ID_LEN: usize = 128;

/// Validated script identifier, safe to use as a file stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptId(String);

impl ScriptId {
    /// Accepts `[A-Za-z0-9_.-]{1,128}` not starting with a dot.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_ID_LEN
            && !raw.starts_with('.')
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata about a stored script
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSummary {
    pub id: ScriptId,
    pub size_bytes: u64,
    pub updated_at: DateTime<Utc>,
}

/// Storage for script bodies keyed by id.
///
/// Writes replace any previous content wholesale; there is no locking,
/// so concurrent writers to one id race and the last one wins.
#[async_trait]
pub trait ScriptStore: Send + Sync {
    async fn get(&self, id: &ScriptId) -> Result<Option<String>>;
    async fn put(&self, id: &ScriptId, content: &str) -> Result<()>;
    /// All stored scripts, sorted by id
    async fn list(&self) -> Result<Vec<ScriptSummary>>;
}

/// One `<id>.lua` file per script in a single directory
#[derive(Debug, Clone)]
pub struct FileScriptStore {
    dir: PathBuf,
}

impl FileScriptStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create scripts directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &ScriptId) -> PathBuf {
        self.dir.join(format!("{}.{}", id, SCRIPT_EXTENSION))
    }
}

#[async_trait]
impl ScriptStore for FileScriptStore {
    async fn get(&self, id: &ScriptId) -> Result<Option<String>> {
        let path = self.path_for(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read script: {}", path.display())),
        }
    }

    async fn put(&self, id: &ScriptId, content: &str) -> Result<()> {
        let path = self.path_for(id);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("write script: {}", path.display()))
    }

    async fn list(&self) -> Result<Vec<ScriptSummary>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("read scripts directory: {}", self.dir.display()))?;

        let mut scripts = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("read scripts directory: {}", self.dir.display()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(ScriptId::parse)
            else {
                continue;
            };
            // Follows symlinks, like `get` does; a dangling link is skipped
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("stat script: {}", path.display()));
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let updated_at = metadata
                .modified()
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());
            scripts.push(ScriptSummary {
                id,
                size_bytes: metadata.len(),
                updated_at,
            });
        }

        scripts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(scripts)
    }
}
