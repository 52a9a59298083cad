//! Deployment history persistence
//!
//! Each profile keeps `<base>/<profile>/deployments.json`. Appends are a
//! read-modify-write of that one file, published atomically. There is no
//! locking: two processes appending at once can lose one append.

use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::deployments::errors::DeploymentError;
use crate::deployments::types::{DeploymentHistory, DeploymentRecord};
use crate::deployments::validation::{validate_deployment_history, validate_record};
use crate::profiles::layout::{ProfilePaths, is_valid_profile_name};
use crate::storage;

#[derive(Debug, Clone)]
pub struct DeploymentTracker {
    base_dir: PathBuf,
}

impl DeploymentTracker {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.base_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn deployments_path(&self, profile: &str) -> Result<PathBuf, DeploymentError> {
        if !is_valid_profile_name(profile) {
            return Err(DeploymentError::InvalidProfileName {
                name: profile.to_string(),
            });
        }
        Ok(ProfilePaths::new(&self.base_dir, profile).deployments)
    }

    /// Append `record` to the profile's history and make it active for its stage.
    ///
    /// Creates the profile directory on first use.
    pub fn record_deployment(
        &self,
        profile: &str,
        record: DeploymentRecord,
    ) -> Result<(), DeploymentError> {
        let path = self.deployments_path(profile)?;

        let result = validate_record(&record);
        if !result.is_valid {
            return Err(DeploymentError::InvalidRecord {
                profile: profile.to_string(),
                errors: result.errors,
            });
        }

        let mut deployments = self.load(profile, &path)?;
        let stage = record.stage.clone();
        let image_tag = record.image_tag.clone();
        deployments.record(record);

        storage::write_json_atomic(&path, &deployments)?;

        tracing::info!(
            event = "core.deployment.recorded",
            profile = profile,
            stage = %stage,
            image_tag = %image_tag,
            history_len = deployments.history.len()
        );

        Ok(())
    }

    /// Full deployment history for `profile`; empty when nothing was recorded.
    pub fn get_deployments(&self, profile: &str) -> Result<DeploymentHistory, DeploymentError> {
        let path = self.deployments_path(profile)?;
        self.load(profile, &path)
    }

    /// Most recently recorded deployment for `stage`, if any.
    pub fn get_active_deployment(
        &self,
        profile: &str,
        stage: &str,
    ) -> Result<Option<DeploymentRecord>, DeploymentError> {
        let deployments = self.get_deployments(profile)?;
        Ok(deployments.active_for(stage).cloned())
    }

    fn load(&self, profile: &str, path: &Path) -> Result<DeploymentHistory, DeploymentError> {
        let Some(document) = storage::read_document(path)? else {
            return Ok(DeploymentHistory::default());
        };

        let result = validate_deployment_history(&document);
        if !result.is_valid {
            tracing::error!(
                event = "core.deployment.schema_invalid",
                profile = profile,
                path = %path.display(),
                error_count = result.errors.len()
            );
            return Err(DeploymentError::SchemaInvalid {
                profile: profile.to_string(),
                errors: result.errors,
            });
        }

        serde_json::from_value(document).map_err(|e| DeploymentError::SchemaInvalid {
            profile: profile.to_string(),
            errors: vec![format!("deployments: {}", e)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tracker() -> (TempDir, DeploymentTracker) {
        let temp_dir = TempDir::new().unwrap();
        let tracker = DeploymentTracker::new(temp_dir.path());
        (temp_dir, tracker)
    }

    fn record(stage: &str, tag: &str, timestamp: &str) -> DeploymentRecord {
        DeploymentRecord::new(
            stage,
            tag,
            "https://abc.execute-api.us-east-1.amazonaws.com/prod",
            "BenchlingWebhookStack",
            "us-east-1",
        )
        .with_timestamp(timestamp)
    }

    #[test]
    fn test_no_history_is_empty_not_error() {
        let (_temp_dir, tracker) = tracker();

        let deployments = tracker.get_deployments("dev").unwrap();
        assert!(deployments.active.is_empty());
        assert!(deployments.history.is_empty());
    }

    #[test]
    fn test_active_deployment_missing_is_none() {
        let (_temp_dir, tracker) = tracker();
        assert!(tracker.get_active_deployment("dev", "dev").unwrap().is_none());

        tracker
            .record_deployment("dev", record("dev", "0.6.0", "2025-01-01T00:00:00Z"))
            .unwrap();
        assert!(tracker.get_active_deployment("dev", "prod").unwrap().is_none());
    }

    #[test]
    fn test_active_deployment_is_tracked_per_stage() {
        let (_temp_dir, tracker) = tracker();
        let prod = record("prod", "1.0.0", "2025-01-01T00:00:00Z");

        tracker.record_deployment("default", prod.clone()).unwrap();
        tracker
            .record_deployment("default", record("dev", "latest", "2025-01-02T00:00:00Z"))
            .unwrap();

        assert_eq!(
            tracker.get_active_deployment("default", "prod").unwrap(),
            Some(prod)
        );
        assert_eq!(
            tracker
                .get_active_deployment("default", "dev")
                .unwrap()
                .map(|r| r.image_tag),
            Some("latest".to_string())
        );
    }

    #[test]
    fn test_first_record_creates_profile_directory() {
        let (temp_dir, tracker) = tracker();

        tracker
            .record_deployment("fresh", record("dev", "0.6.0", "2025-01-01T00:00:00Z"))
            .unwrap();

        assert!(temp_dir.path().join("fresh").join("deployments.json").is_file());
    }

    #[test]
    fn test_last_recorded_wins_regardless_of_timestamp() {
        let (_temp_dir, tracker) = tracker();
        let third = record("dev", "0.6.2", "2024-06-01T00:00:00Z");

        tracker
            .record_deployment("dev", record("dev", "0.6.0", "2025-05-01T00:00:00Z"))
            .unwrap();
        tracker
            .record_deployment("dev", record("dev", "0.6.1", "2026-01-01T00:00:00Z"))
            .unwrap();
        tracker.record_deployment("dev", third.clone()).unwrap();

        let deployments = tracker.get_deployments("dev").unwrap();
        assert_eq!(deployments.history.len(), 3);
        assert_eq!(deployments.history[0], third);
        assert_eq!(deployments.active["dev"], third);
        assert_eq!(
            tracker.get_active_deployment("dev", "dev").unwrap(),
            Some(third)
        );
    }

    #[test]
    fn test_history_spans_stages() {
        let (_temp_dir, tracker) = tracker();
        tracker
            .record_deployment("default", record("dev", "a", "2025-01-01T00:00:00Z"))
            .unwrap();
        tracker
            .record_deployment("default", record("prod", "b", "2025-01-02T00:00:00Z"))
            .unwrap();

        let deployments = tracker.get_deployments("default").unwrap();
        let tags: Vec<&str> = deployments
            .history
            .iter()
            .map(|r| r.image_tag.as_str())
            .collect();
        assert_eq!(tags, vec!["b", "a"]);
        assert_eq!(deployments.active.len(), 2);
    }

    #[test]
    fn test_profiles_are_independent() {
        let (_temp_dir, tracker) = tracker();
        tracker
            .record_deployment("dev", record("dev", "a", "2025-01-01T00:00:00Z"))
            .unwrap();

        assert!(tracker.get_deployments("default").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_schema_is_reported() {
        let (temp_dir, tracker) = tracker();
        let dir = temp_dir.path().join("dev");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("deployments.json"), r#"{"active": {}, "history": {}}"#).unwrap();

        assert!(matches!(
            tracker.get_deployments("dev"),
            Err(DeploymentError::SchemaInvalid { .. })
        ));
        assert!(matches!(
            tracker.record_deployment("dev", record("dev", "a", "2025-01-01T00:00:00Z")),
            Err(DeploymentError::SchemaInvalid { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let (temp_dir, tracker) = tracker();
        let dir = temp_dir.path().join("dev");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("deployments.json"), "{ truncated").unwrap();

        assert!(matches!(
            tracker.get_active_deployment("dev", "dev"),
            Err(DeploymentError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_invalid_record_is_not_written() {
        let (temp_dir, tracker) = tracker();
        let bad = record("dev", "0.6.0", "not a time");

        assert!(matches!(
            tracker.record_deployment("dev", bad),
            Err(DeploymentError::InvalidRecord { .. })
        ));
        assert!(!temp_dir.path().join("dev").exists());
    }

    #[test]
    fn test_invalid_profile_name() {
        let (_temp_dir, tracker) = tracker();
        assert!(matches!(
            tracker.get_deployments("../etc"),
            Err(DeploymentError::InvalidProfileName { .. })
        ));
    }

    #[test]
    fn test_on_disk_format_is_camel_case() {
        let (temp_dir, tracker) = tracker();
        tracker
            .record_deployment(
                "dev",
                record("dev", "0.6.0", "2025-01-01T00:00:00Z").with_deployed_by("ci"),
            )
            .unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("dev").join("deployments.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["active"]["dev"]["imageTag"], "0.6.0");
        assert_eq!(value["history"][0]["deployedBy"], "ci");
    }
}
