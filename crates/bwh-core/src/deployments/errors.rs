use std::path::PathBuf;

use crate::errors::BwhError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error(
        "Invalid profile name '{name}': use 1-64 letters, digits, hyphens or underscores"
    )]
    InvalidProfileName { name: String },

    #[error("Invalid JSON in deployments file '{}': {message}", .path.display())]
    InvalidJson { path: PathBuf, message: String },

    #[error("Invalid deployments schema for profile '{profile}': {}", .errors.join("; "))]
    SchemaInvalid { profile: String, errors: Vec<String> },

    #[error("Invalid deployment record for profile '{profile}': {}", .errors.join("; "))]
    InvalidRecord { profile: String, errors: Vec<String> },

    #[error("IO error for '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<StorageError> for DeploymentError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Io { path, source } => DeploymentError::IoError { path, source },
            StorageError::InvalidJson { path, message } => {
                DeploymentError::InvalidJson { path, message }
            }
            StorageError::Serialize { path, message } => DeploymentError::IoError {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
            },
        }
    }
}

impl BwhError for DeploymentError {
    fn error_code(&self) -> &'static str {
        match self {
            DeploymentError::InvalidProfileName { .. } => "INVALID_PROFILE_NAME",
            DeploymentError::InvalidJson { .. } => "DEPLOYMENTS_INVALID_JSON",
            DeploymentError::SchemaInvalid { .. } => "DEPLOYMENTS_SCHEMA_INVALID",
            DeploymentError::InvalidRecord { .. } => "DEPLOYMENT_RECORD_INVALID",
            DeploymentError::IoError { .. } => "DEPLOYMENTS_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            DeploymentError::InvalidProfileName { .. }
            | DeploymentError::InvalidJson { .. }
            | DeploymentError::SchemaInvalid { .. }
            | DeploymentError::InvalidRecord { .. } => true,

            DeploymentError::IoError { .. } => false,
        }
    }
}
