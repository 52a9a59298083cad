//! Profile configuration types.
//!
//! These mirror the on-disk `config.json` document. Field names are camelCase
//! on disk; the leading-underscore sections (`_metadata`, `_inherits`) are
//! bookkeeping rather than deployment settings.
//!
//! # Example Profile
//!
//! ```json
//! {
//!   "quilt": {
//!     "stackArn": "arn:aws:cloudformation:us-east-1:123456789012:stack/quilt/abc",
//!     "catalog": "quilt.example.com",
//!     "database": "quilt_db",
//!     "queueUrl": "https://sqs.us-east-1.amazonaws.com/123456789012/quilt-queue",
//!     "region": "us-east-1"
//!   },
//!   "benchling": { "tenant": "acme", "clientId": "cid", "appDefinitionId": "appdef_1" },
//!   "packages": { "bucket": "acme-packages", "prefix": "benchling", "metadataKey": "experiment_id" },
//!   "deployment": { "region": "us-east-1", "imageTag": "0.6.0" },
//!   "_metadata": {
//!     "version": "0.7.0",
//!     "createdAt": "2025-11-04T12:00:00Z",
//!     "updatedAt": "2025-11-04T12:00:00Z",
//!     "source": "wizard"
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Full configuration for one named deployment environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub quilt: QuiltConfig,
    pub benchling: BenchlingConfig,
    pub packages: PackageConfig,
    pub deployment: DeploymentConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityConfig>,

    #[serde(rename = "_metadata")]
    pub metadata: ProfileMetadata,

    /// Base profile this one is merged against. Never present on a resolved view.
    #[serde(
        rename = "_inherits",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub inherits: Option<String>,
}

/// Quilt catalog stack the webhook publishes packages into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuiltConfig {
    pub stack_arn: String,
    pub catalog: String,
    pub database: String,
    pub queue_url: String,
    pub region: String,
}

/// Benchling tenant and app credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchlingConfig {
    pub tenant: String,
    pub client_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_arn: Option<String>,

    pub app_definition_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_entry_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    pub bucket: String,
    pub prefix: String,
    pub metadata_key: String,
}

/// Where and what to deploy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecr_repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Wire values accepted in `logging.level`.
    pub const ALL: [&'static str; 4] = ["DEBUG", "INFO", "WARNING", "ERROR"];
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_allow_list: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_verification: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetadata {
    pub version: String,
    pub created_at: String,
    pub updated_at: String,
    pub source: ConfigSource,
}

/// Which tool produced the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Wizard,
    Manual,
    Cli,
}

impl ConfigSource {
    /// Wire values accepted in `_metadata.source`.
    pub const ALL: [&'static str; 3] = ["wizard", "manual", "cli"];
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigSource::Wizard => "wizard",
            ConfigSource::Manual => "manual",
            ConfigSource::Cli => "cli",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of schema validation. `errors` is empty iff `is_valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_config_wire_names() {
        let config: ProfileConfig = serde_json::from_value(json!({
            "quilt": {
                "stackArn": "arn:aws:cloudformation:us-east-1:123456789012:stack/q/1",
                "catalog": "c", "database": "d", "queueUrl": "q", "region": "us-east-1"
            },
            "benchling": { "tenant": "t", "clientId": "id", "appDefinitionId": "app" },
            "packages": { "bucket": "b", "prefix": "p", "metadataKey": "k" },
            "deployment": { "region": "us-east-1", "imageTag": "0.6.0" },
            "logging": { "level": "WARNING" },
            "_metadata": {
                "version": "1", "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z", "source": "cli"
            },
            "_inherits": "default"
        }))
        .unwrap();

        assert_eq!(config.deployment.image_tag.as_deref(), Some("0.6.0"));
        assert_eq!(config.logging.as_ref().unwrap().level, LogLevel::Warning);
        assert_eq!(config.metadata.source, ConfigSource::Cli);
        assert_eq!(config.inherits.as_deref(), Some("default"));

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["_inherits"], "default");
        assert_eq!(value["_metadata"]["createdAt"], "2025-01-01T00:00:00Z");
        assert!(value.get("security").is_none());
        assert!(value["benchling"].get("clientSecret").is_none());
    }

    #[test]
    fn test_enum_display_matches_wire_values() {
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(ConfigSource::Wizard.to_string(), "wizard");
        assert!(LogLevel::ALL.contains(&LogLevel::Debug.to_string().as_str()));
        assert!(ConfigSource::ALL.contains(&ConfigSource::Manual.to_string().as_str()));
    }

    #[test]
    fn test_validation_result_from_errors() {
        assert!(ValidationResult::from_errors(vec![]).is_valid);
        let invalid = ValidationResult::from_errors(vec!["quilt: missing".to_string()]);
        assert!(!invalid.is_valid);
        assert_eq!(invalid.errors.len(), 1);
    }
}
