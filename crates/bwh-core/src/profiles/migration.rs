//! Legacy layout detection
//!
//! Earlier releases kept flat files directly under the base directory. Those
//! files are not readable by the per-profile layout, so a missing profile is
//! checked against them before reporting a plain "not found".

use std::path::Path;

use crate::config::CONFIG_FILE_NAME;

/// Flat-layout artifacts from the pre-profile format.
const LEGACY_FILES: &[&str] = &["default.json", "deploy.json", "e2e.json"];

/// Directory used by the pre-profile format for named environments.
///
/// A directory of that name holding a `config.json` is a current-layout
/// profile called `profiles`, not a legacy artifact.
const LEGACY_DIRS: &[&str] = &["profiles"];

fn is_legacy_dir(dir: &Path) -> bool {
    dir.is_dir() && !dir.join(CONFIG_FILE_NAME).is_file()
}

/// Return the legacy artifacts present under `base_dir`, in a stable order.
///
/// Never reads or converts them.
pub fn detect_legacy_config(base_dir: &Path) -> Vec<String> {
    let files = LEGACY_FILES
        .iter()
        .filter(|name| base_dir.join(name).is_file());
    let dirs = LEGACY_DIRS
        .iter()
        .filter(|name| is_legacy_dir(&base_dir.join(name)));

    let found: Vec<String> = files
        .map(|name| name.to_string())
        .chain(dirs.map(|name| format!("{}/", name)))
        .collect();

    if !found.is_empty() {
        tracing::warn!(
            event = "core.migration.legacy_config_detected",
            base_dir = %base_dir.display(),
            files = %found.join(", ")
        );
    }

    found
}
