use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Reserved profile that cannot be deleted (the production profile).
pub const DEFAULT_PROFILE: &str = "default";

/// Configuration artifact inside each profile directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Copy of the immediately-prior configuration, refreshed on every overwrite.
pub const BACKUP_FILE_NAME: &str = "config.json.backup";

/// Deployment history artifact inside each profile directory.
pub const DEPLOYMENTS_FILE_NAME: &str = "deployments.json";

/// Runtime configuration for the profile store.
///
/// Holds the base directory under which one subdirectory per profile lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base directory for all profiles
    pub base_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Check that the base directory is usable.
    ///
    /// A missing directory is fine (it is created on first write); a regular
    /// file in its place is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_dir.exists() && !self.base_dir.is_dir() {
            return Err(ConfigError::BaseDirNotADirectory {
                path: self.base_dir.display().to_string(),
            });
        }
        Ok(())
    }
}
