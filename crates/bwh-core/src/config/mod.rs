//! # Store Configuration
//!
//! Locates the base directory that holds every profile.
//!
//! ## Resolution Order
//!
//! 1. **`BWH_CONFIG_DIR`** - explicit override (tests, CI, multiple installs)
//! 2. **User config dir** - `<config_dir>/benchling-webhook` (e.g. `~/.config/benchling-webhook`)
//! 3. **Current directory** - `./.benchling-webhook` when no config dir can be determined
//!
//! ## On-disk Layout
//!
//! ```text
//! ~/.config/benchling-webhook/
//! ├── default/
//! │   ├── config.json
//! │   ├── config.json.backup
//! │   └── deployments.json
//! └── dev/
//!     ├── config.json
//!     └── deployments.json
//! ```

pub mod loading;
pub mod types;

pub use loading::{BASE_DIR_ENV_VAR, resolve_base_dir};
pub use types::{
    BACKUP_FILE_NAME, CONFIG_FILE_NAME, DEFAULT_PROFILE, DEPLOYMENTS_FILE_NAME, StoreConfig,
};

impl StoreConfig {
    /// Resolve the base directory from the environment.
    ///
    /// See [`loading::resolve_base_dir`] for details.
    pub fn from_env() -> Self {
        Self::new(loading::resolve_base_dir())
    }
}
