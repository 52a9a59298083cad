//! Profile persistence
//!
//! Reads and writes `<base>/<profile>/config.json`. Writes are validated first,
//! back up the previous configuration, and publish atomically. Nothing is
//! cached: every read goes to the filesystem.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::{DEFAULT_PROFILE, StoreConfig};
use crate::profiles::errors::ProfileError;
use crate::profiles::layout::{ProfilePaths, is_valid_profile_name};
use crate::profiles::migration::detect_legacy_config;
use crate::profiles::types::{ProfileConfig, ValidationResult};
use crate::profiles::validation::{validate_config, validate_overlay, validate_profile};
use crate::storage;

#[derive(Debug, Clone)]
pub struct ProfileStore {
    base_dir: PathBuf,
}

fn schema_error(name: &str, result: ValidationResult) -> ProfileError {
    ProfileError::SchemaInvalid {
        name: name.to_string(),
        errors: result.errors,
    }
}

impl ProfileStore {
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

    /// Artifact paths for `name`, after checking the name is safe.
    pub fn paths(&self, name: &str) -> Result<ProfilePaths, ProfileError> {
        if !is_valid_profile_name(name) {
            return Err(ProfileError::InvalidProfileName {
                name: name.to_string(),
            });
        }
        Ok(ProfilePaths::new(&self.base_dir, name))
    }

    /// Read the profile's raw document without schema validation.
    ///
    /// A missing profile is reported as `LegacyConfigDetected` when flat-layout
    /// files from an earlier release are present, `NotFound` otherwise.
    pub fn read_document(&self, name: &str) -> Result<Map<String, Value>, ProfileError> {
        let paths = self.paths(name)?;

        let Some(document) = storage::read_document(&paths.config)? else {
            let legacy = detect_legacy_config(&self.base_dir);
            if !legacy.is_empty() {
                return Err(ProfileError::LegacyConfigDetected {
                    name: name.to_string(),
                    base_dir: self.base_dir.clone(),
                    files: legacy,
                });
            }
            return Err(ProfileError::NotFound {
                name: name.to_string(),
                path: paths.config,
            });
        };

        match document {
            Value::Object(map) => Ok(map),
            _ => Err(ProfileError::SchemaInvalid {
                name: name.to_string(),
                errors: vec!["config: must be a JSON object".to_string()],
            }),
        }
    }

    /// Read and validate a profile exactly as stored (no inheritance applied).
    pub fn read_profile(&self, name: &str) -> Result<ProfileConfig, ProfileError> {
        let document = self.read_document(name)?;
        into_profile(name, Value::Object(document))
    }

    /// Validate and persist a complete profile.
    ///
    /// An invalid configuration is never written.
    pub fn write_profile(&self, name: &str, config: &ProfileConfig) -> Result<(), ProfileError> {
        let paths = self.paths(name)?;

        let result = validate_config(config);
        if !result.is_valid {
            tracing::warn!(
                event = "core.profile.write_rejected",
                profile = name,
                error_count = result.errors.len()
            );
            return Err(schema_error(name, result));
        }

        self.persist(name, &paths, config)
    }

    /// Validate and persist a partial profile that declares `_inherits`.
    ///
    /// Only the overridden fields need to be present; the rest comes from the
    /// base profile when resolved.
    pub fn write_overlay(&self, name: &str, overlay: &Value) -> Result<(), ProfileError> {
        let paths = self.paths(name)?;

        let result = validate_overlay(overlay);
        if !result.is_valid {
            tracing::warn!(
                event = "core.profile.overlay_rejected",
                profile = name,
                error_count = result.errors.len()
            );
            return Err(schema_error(name, result));
        }

        self.persist(name, &paths, overlay)
    }

    fn persist<T: serde::Serialize + ?Sized>(
        &self,
        name: &str,
        paths: &ProfilePaths,
        document: &T,
    ) -> Result<(), ProfileError> {
        let had_previous = paths.config.is_file();
        if had_previous {
            storage::copy_atomic(&paths.config, &paths.backup)?;
        }

        storage::write_json_atomic(&paths.config, document)?;

        tracing::info!(
            event = "core.profile.saved",
            profile = name,
            path = %paths.config.display(),
            backup_created = had_previous
        );

        Ok(())
    }

    /// The configuration as it was before the most recent overwrite, if any.
    pub fn read_backup(&self, name: &str) -> Result<Option<Value>, ProfileError> {
        let paths = self.paths(name)?;
        Ok(storage::read_document(&paths.backup)?)
    }

    /// Names of every directory under the base that holds a `config.json`.
    ///
    /// A missing base directory yields an empty set.
    pub fn list_profiles(&self) -> Result<BTreeSet<String>, ProfileError> {
        let mut profiles = BTreeSet::new();

        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(profiles),
            Err(e) => {
                return Err(ProfileError::IoError {
                    path: self.base_dir.clone(),
                    source: e,
                });
            }
        };

        for entry in entries {
            let entry = entry.map_err(|e| ProfileError::IoError {
                path: self.base_dir.clone(),
                source: e,
            })?;
            let path = entry.path();

            if !path.is_dir() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };

            if !is_valid_profile_name(&name) {
                tracing::debug!(
                    event = "core.profile.list_skipped_invalid_name",
                    path = %path.display()
                );
                continue;
            }

            if ProfilePaths::new(&self.base_dir, &name).config.is_file() {
                profiles.insert(name);
            }
        }

        Ok(profiles)
    }

    /// True iff the profile's `config.json` exists and parses as a JSON object.
    ///
    /// Says nothing about schema validity.
    pub fn profile_exists(&self, name: &str) -> bool {
        let Ok(paths) = self.paths(name) else {
            return false;
        };

        matches!(
            storage::read_document(&paths.config),
            Ok(Some(Value::Object(_)))
        )
    }

    /// Remove the profile's whole directory, deployment history included.
    pub fn delete_profile(&self, name: &str) -> Result<(), ProfileError> {
        if name == DEFAULT_PROFILE {
            tracing::warn!(event = "core.profile.delete_protected", profile = name);
            return Err(ProfileError::ProtectedProfileDeletion {
                name: name.to_string(),
            });
        }

        let paths = self.paths(name)?;
        if !paths.config.is_file() {
            return Err(ProfileError::ProfileDoesNotExist {
                name: name.to_string(),
            });
        }

        fs::remove_dir_all(&paths.dir).map_err(|e| ProfileError::IoError {
            path: paths.dir.clone(),
            source: e,
        })?;

        tracing::info!(
            event = "core.profile.deleted",
            profile = name,
            path = %paths.dir.display()
        );

        Ok(())
    }
}

/// Validate a complete profile document and convert it into its typed form.
pub(crate) fn into_profile(name: &str, document: Value) -> Result<ProfileConfig, ProfileError> {
    let result = validate_profile(&document);
    if !result.is_valid {
        tracing::warn!(
            event = "core.profile.read_invalid",
            profile = name,
            error_count = result.errors.len()
        );
        return Err(schema_error(name, result));
    }

    serde_json::from_value(document).map_err(|e| ProfileError::SchemaInvalid {
        name: name.to_string(),
        errors: vec![format!("config: {}", e)],
    })
}
