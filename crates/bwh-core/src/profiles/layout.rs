//! Per-profile directory layout.

use std::path::{Path, PathBuf};

use crate::config::{BACKUP_FILE_NAME, CONFIG_FILE_NAME, DEPLOYMENTS_FILE_NAME};

const MAX_PROFILE_NAME_LEN: usize = 64;

/// Check that a profile name is safe to use as a directory name.
///
/// Allows ASCII alphanumerics, hyphens and underscores. Rejects anything that
/// could escape the base directory (separators, `..`, absolute paths).
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_PROFILE_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Paths of every artifact belonging to one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePaths {
    pub dir: PathBuf,
    pub config: PathBuf,
    pub backup: PathBuf,
    pub deployments: PathBuf,
}

impl ProfilePaths {
    /// Build the paths for `name` under `base_dir`.
    ///
    /// Callers validate `name` with [`is_valid_profile_name`] first.
    pub fn new(base_dir: &Path, name: &str) -> Self {
        let dir = base_dir.join(name);
        Self {
            config: dir.join(CONFIG_FILE_NAME),
            backup: dir.join(BACKUP_FILE_NAME),
            deployments: dir.join(DEPLOYMENTS_FILE_NAME),
            dir,
        }
    }
}
