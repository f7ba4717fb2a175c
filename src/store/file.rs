//! File-based configuration store implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ConfigStore, StaticConfig, StoreError};

/// File-based implementation of [`ConfigStore`].
///
/// Stores the record as pretty-printed JSON with atomic write semantics.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename to prevent corruption:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// This ensures the file is either fully written or left as it was.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Creates a new file-based store at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Option<StaticConfig>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        let config = serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(Some(config))
    }

    fn save(&self, config: &StaticConfig) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(config).map_err(StoreError::Serialize)?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        // Append .tmp instead of replacing the extension to avoid conflicts
        // (config.json -> config.json.tmp, not config.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));

        std::fs::write(&temp_path, content).map_err(|e| self.write_error(e))?;

        // Atomic rename (on most filesystems)
        std::fs::rename(&temp_path, &self.path).map_err(|e| self.write_error(e))?;

        Ok(())
    }
}
