use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One deployment event.
///
/// Records are immutable history once written; `timestamp` is informational
/// and plays no part in ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub stage: String,
    pub timestamp: String,
    pub image_tag: String,
    pub endpoint: String,
    pub stack_name: String,
    pub region: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl DeploymentRecord {
    /// Create a record stamped with the current UTC time.
    pub fn new(
        stage: impl Into<String>,
        image_tag: impl Into<String>,
        endpoint: impl Into<String>,
        stack_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            stage: stage.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            image_tag: image_tag.into(),
            endpoint: endpoint.into(),
            stack_name: stack_name.into(),
            region: region.into(),
            deployed_by: None,
            commit: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_deployed_by(mut self, deployed_by: impl Into<String>) -> Self {
        self.deployed_by = Some(deployed_by.into());
        self
    }

    pub fn with_commit(mut self, commit: impl Into<String>) -> Self {
        self.commit = Some(commit.into());
        self
    }
}

/// Deployment log for one profile.
///
/// `history` is newest-recorded first and only ever grows. `active[stage]` is
/// the first entry of `history` with that stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentHistory {
    pub active: BTreeMap<String, DeploymentRecord>,
    pub history: Vec<DeploymentRecord>,
}

impl DeploymentHistory {
    /// Prepend `record` and make it the active deployment for its stage.
    ///
    /// The last recorded deployment wins regardless of timestamps.
    pub fn record(&mut self, record: DeploymentRecord) {
        self.active.insert(record.stage.clone(), record.clone());
        self.history.insert(0, record);
    }

    /// Active deployment for `stage`, if one was ever recorded.
    pub fn active_for(&self, stage: &str) -> Option<&DeploymentRecord> {
        self.active.get(stage)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
