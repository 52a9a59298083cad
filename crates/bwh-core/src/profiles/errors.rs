use std::path::PathBuf;

use crate::errors::BwhError;
use crate::storage::StorageError;

/// Note: This type intentionally does not implement `Clone` because
/// `io::Error` (in `IoError`) is not `Clone`.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile '{name}' not found at '{}'. Run the setup wizard to create it.", .path.display())]
    NotFound { name: String, path: PathBuf },

    #[error(
        "Configuration format changed; legacy files are not compatible: {}. \
         Re-run setup to create profile '{name}' in the per-profile layout, then remove the legacy files from '{}'.",
        .files.join(", "),
        .base_dir.display()
    )]
    LegacyConfigDetected {
        name: String,
        base_dir: PathBuf,
        files: Vec<String>,
    },

    #[error("Invalid JSON in '{}': {message}", .path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[error("Invalid configuration for profile '{name}': {}", .errors.join("; "))]
    SchemaInvalid { name: String, errors: Vec<String> },

    #[error("Circular inheritance detected at profile '{profile}': {}", .chain.join(" -> "))]
    CircularInheritance { profile: String, chain: Vec<String> },

    #[error("Cannot delete the protected profile '{name}'")]
    ProtectedProfileDeletion { name: String },

    #[error("Cannot delete profile '{name}': profile does not exist")]
    ProfileDoesNotExist { name: String },

    #[error(
        "Invalid profile name '{name}': use 1-64 letters, digits, hyphens or underscores"
    )]
    InvalidProfileName { name: String },

    #[error("IO error for '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<StorageError> for ProfileError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io { path, source } => ProfileError::IoError { path, source },
            StorageError::InvalidJson { path, message } => {
                ProfileError::InvalidJson { path, message }
            }
            StorageError::Serialize { path, message } => ProfileError::IoError {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
            },
        }
    }
}

impl BwhError for ProfileError {
    fn error_code(&self) -> &'static str {
        match self {
            ProfileError::NotFound { .. } => "PROFILE_NOT_FOUND",
            ProfileError::LegacyConfigDetected { .. } => "LEGACY_CONFIG_DETECTED",
            ProfileError::InvalidJson { .. } => "PROFILE_INVALID_JSON",
            ProfileError::SchemaInvalid { .. } => "PROFILE_SCHEMA_INVALID",
            ProfileError::CircularInheritance { .. } => "CIRCULAR_INHERITANCE",
            ProfileError::ProtectedProfileDeletion { .. } => "PROTECTED_PROFILE_DELETION",
            ProfileError::ProfileDoesNotExist { .. } => "PROFILE_DOES_NOT_EXIST",
            ProfileError::InvalidProfileName { .. } => "INVALID_PROFILE_NAME",
            ProfileError::IoError { .. } => "PROFILE_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            ProfileError::NotFound { .. }
            | ProfileError::LegacyConfigDetected { .. }
            | ProfileError::InvalidJson { .. }
            | ProfileError::SchemaInvalid { .. }
            | ProfileError::CircularInheritance { .. }
            | ProfileError::ProtectedProfileDeletion { .. }
            | ProfileError::ProfileDoesNotExist { .. }
            | ProfileError::InvalidProfileName { .. } => true,

            ProfileError::IoError { .. } => false,
        }
    }
}
