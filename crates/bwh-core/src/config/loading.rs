//! Base directory resolution.

use std::path::PathBuf;

/// Environment variable that overrides the base directory.
pub const BASE_DIR_ENV_VAR: &str = "BWH_CONFIG_DIR";

const APP_DIR_NAME: &str = "benchling-webhook";

/// Resolve the base configuration directory.
///
/// `BWH_CONFIG_DIR` wins when set and non-empty. Otherwise the platform config
/// directory is used, falling back to `./.benchling-webhook` when it cannot be
/// determined.
pub fn resolve_base_dir() -> PathBuf {
    if let Ok(path_str) = std::env::var(BASE_DIR_ENV_VAR)
        && !path_str.is_empty()
    {
        tracing::debug!(
            event = "core.config.base_dir_override",
            path = %path_str
        );
        return PathBuf::from(path_str);
    }

    match dirs::config_dir() {
        Some(config_dir) => config_dir.join(APP_DIR_NAME),
        None => {
            tracing::error!(
                event = "core.config.config_dir_not_found",
                fallback = ".",
                "Could not determine config directory - using current directory as fallback"
            );
            PathBuf::from(".").join(format!(".{}", APP_DIR_NAME))
        }
    }
}

/// Test utilities for base directory resolution.
///
/// Public so integration tests can share the env lock/guard.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify BWH_CONFIG_DIR.
    pub static BASE_DIR_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes BWH_CONFIG_DIR on drop.
    pub struct BaseDirEnvGuard;

    impl BaseDirEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold BASE_DIR_ENV_LOCK to serialize access
            // from Rust test code. Acceptable in test-only code.
            unsafe { std::env::set_var(super::BASE_DIR_ENV_VAR, path) };
            Self
        }
    }

    impl Drop for BaseDirEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold BASE_DIR_ENV_LOCK throughout guard
            // lifetime. See safety comment in new().
            unsafe { std::env::remove_var(super::BASE_DIR_ENV_VAR) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_dir_env_override() {
        let _lock = BASE_DIR_ENV_LOCK.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let custom = temp_dir.path().join("profiles-root");
        let _guard = BaseDirEnvGuard::new(&custom);

        assert_eq!(resolve_base_dir(), custom);
    }

    #[test]
    fn test_base_dir_default_after_cleanup() {
        let _lock = BASE_DIR_ENV_LOCK.lock().unwrap();

        // SAFETY: We hold BASE_DIR_ENV_LOCK to serialize test access
        unsafe { std::env::remove_var(BASE_DIR_ENV_VAR) };

        let path = resolve_base_dir();
        assert!(path.to_string_lossy().contains("benchling-webhook"));
    }

    #[test]
    fn test_base_dir_empty_env_var_uses_default() {
        let _lock = BASE_DIR_ENV_LOCK.lock().unwrap();

        // SAFETY: We hold BASE_DIR_ENV_LOCK to serialize test access
        unsafe { std::env::set_var(BASE_DIR_ENV_VAR, "") };

        let path = resolve_base_dir();
        assert!(path.to_string_lossy().contains("benchling-webhook"));

        // SAFETY: We hold BASE_DIR_ENV_LOCK to serialize test access
        unsafe { std::env::remove_var(BASE_DIR_ENV_VAR) };
    }

    #[test]
    fn test_store_config_from_env() {
        let _lock = BASE_DIR_ENV_LOCK.lock().unwrap();

        let temp_dir = TempDir::new().unwrap();
        let _guard = BaseDirEnvGuard::new(temp_dir.path());

        let config = crate::config::StoreConfig::from_env();
        assert_eq!(config.base_dir(), temp_dir.path());
    }
}
