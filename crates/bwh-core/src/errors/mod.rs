use std::error::Error;

/// Base trait for all bwh errors
pub trait BwhError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error is caused by user input or on-disk state the user can fix
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration directory '{path}' is not a directory")]
    BaseDirNotADirectory { path: String },
}

impl BwhError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::BaseDirNotADirectory { .. } => "CONFIG_BASE_DIR_NOT_A_DIRECTORY",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ConfigError::BaseDirNotADirectory { .. } => true,
        }
    }
}
