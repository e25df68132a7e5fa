use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CredentialStore;
use crate::error::AuthError;

/// Configuration for file-backed credential storage.
#[derive(Debug, Clone)]
pub struct FileStoreConfig {
    pub base_dir: PathBuf,
}

impl FileStoreConfig {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_dir() -> PathBuf {
        default_tokenward_dir()
    }
}

/// File-backed credential store using one TOML file per key.
///
/// This is the persistent backend: credentials written here survive process
/// restarts.
///
/// # Example
/// ```no_run
/// use tokenward::store::{CredentialStore, FileStore};
///
/// let store = FileStore::new_default();
/// store.write("access_token", "abc123")?;
/// # Ok::<(), tokenward::AuthError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            base_dir: config.base_dir,
        }
    }

    pub fn new_default() -> Self {
        Self {
            base_dir: default_tokenward_dir(),
        }
    }

    fn credential_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.toml", normalize_key(key)))
    }

    fn ensure_parent(path: &Path) -> Result<(), AuthError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, AuthError> {
        let path = self.credential_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AuthError::Io(err.to_string())),
        };
        let file: CredentialFile = toml::from_str(&raw)?;
        Ok(Some(file.value))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let path = self.credential_path(key);
        Self::ensure_parent(&path)?;
        let file = CredentialFile {
            version: 1,
            key: key.to_string(),
            value: value.to_string(),
            saved_at: Utc::now(),
        };
        let serialized = toml::to_string(&file)?;
        fs::write(&path, serialized)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CredentialFile {
    version: u32,
    key: String,
    value: String,
    saved_at: DateTime<Utc>,
}

fn default_tokenward_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".tokenward"))
        .unwrap_or_else(|| PathBuf::from(".tokenward"))
}

fn normalize_key(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "default".to_string();
    }
    let mut out = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() || lower == '-' || lower == '_' {
            out.push(lower);
        } else {
            out.push('-');
        }
    }
    if out.trim_matches('-').is_empty() {
        "default".to_string()
    } else {
        out
    }
}
