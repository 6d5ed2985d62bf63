//! JSON settings file persistence.
//!
//! Stores a flat JSON object in `writerai.json` inside a per-user
//! configuration directory, for example:
//!
//! ```json
//! {
//!   "api_key": "sk-...",
//!   "api_type": "chat",
//!   "debug_logging": "yes",
//!   "endpoint": "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions",
//!   "model": "QWen"
//! }
//! ```
//!
//! # Read-merge-write
//!
//! Every write reloads the file, sets one key, and writes the whole object
//! back.  Keys this process never touched survive.  The file is created on
//! the first write and is never deleted here.  There is no locking: a
//! concurrent external writer can lose its change (last writer wins).
//!
//! The new contents go to a temporary file in the same directory which then
//! replaces the settings file with a rename, so a crash mid-write leaves
//! either the old or the new file, never a truncated one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use writerai_core::domain::settings::CONFIG_FILE_NAME;

use crate::application::collaborators::{ConfigWriteError, SettingsStore};

/// Error raised while loading the settings file.
///
/// Never escapes [`SettingsStore::read`]; every variant is treated as an
/// empty store.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings file {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },
}

/// Settings store backed by `<dir>/writerai.json`.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    /// Creates a store in `config_dir`.  Nothing is touched on disk until the
    /// first write.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: config_dir.into().join(CONFIG_FILE_NAME),
        }
    }

    /// Full path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored object.  A missing file is an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the file exists but cannot be read,
    /// is not valid JSON, or is not a JSON object.
    pub fn load(&self) -> Result<Map<String, Value>, ConfigLoadError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(ConfigLoadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(ConfigLoadError::NotAnObject {
                path: self.path.clone(),
            }),
            Err(source) => Err(ConfigLoadError::Parse {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn load_or_empty(&self) -> Map<String, Value> {
        self.load().unwrap_or_else(|e| {
            debug!("treating settings as empty: {e}");
            Map::new()
        })
    }

    fn persist(&self, map: &Map<String, Value>) -> Result<(), ConfigWriteError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| ConfigWriteError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
        let content = serde_json::to_string_pretty(map)?;
        write_atomically(&self.path, content.as_bytes()).map_err(|source| {
            ConfigWriteError::Write {
                path: self.path.display().to_string(),
                source,
            }
        })
    }
}

impl SettingsStore for JsonConfigStore {
    fn read(&self, key: &str, default: Value) -> Value {
        self.load_or_empty().remove(key).unwrap_or(default)
    }

    fn write(&self, key: &str, value: Value) -> Result<(), ConfigWriteError> {
        let mut map = self.load_or_empty();
        map.insert(key.to_string(), value);
        self.persist(&map)?;
        debug!(key, path = %self.path.display(), "setting saved");
        Ok(())
    }
}

/// Writes `content` to a sibling temp file and renames it over `path`.
fn write_atomically(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(CONFIG_FILE_NAME);
    let tmp_path = dir.join(format!(".{file_name}.{}.tmp", Uuid::new_v4()));

    let result = write_new_file(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_new_file(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

/// Resolves the per-user configuration directory for the standalone binary.
///
/// Inside a real host the directory is supplied by the host instead.
/// - Windows:  `%APPDATA%\WriterAI`
/// - Linux:    `$XDG_CONFIG_HOME/writerai` or `~/.config/writerai`
/// - macOS:    `~/Library/Application Support/WriterAI`
pub fn default_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("WriterAI"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("writerai"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("WriterAI")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
