//! Profile inheritance
//!
//! A profile may name a base profile in `_inherits`. The effective
//! configuration is built by walking the chain to its root and merging each
//! profile over its base, root first.
//!
//! Merge rules, by top-level key:
//! - `quilt`, `benchling`, `packages`, `deployment`, `_metadata`: field by
//!   field, child fields win, base-only fields survive. One level deep only.
//! - `logging`, `security`: replaced wholesale when the child has them.
//! - anything else: child value replaces base value.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::profiles::errors::ProfileError;
use crate::profiles::store::{ProfileStore, into_profile};
use crate::profiles::types::ProfileConfig;
use crate::profiles::validation::INHERITS_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionMerge {
    FieldByField,
    Replace,
}

fn section_merge(section: &str) -> SectionMerge {
    match section {
        "quilt" | "benchling" | "packages" | "deployment" | "_metadata" => {
            SectionMerge::FieldByField
        }
        _ => SectionMerge::Replace,
    }
}

/// Merge `child` over `base` using the per-section rules.
pub fn merge_profiles(base: Map<String, Value>, child: Map<String, Value>) -> Map<String, Value> {
    let mut merged = base;

    for (key, child_value) in child {
        let base_value = merged.remove(&key);
        let value = match (section_merge(&key), base_value, child_value) {
            (SectionMerge::FieldByField, Some(Value::Object(mut fields)), Value::Object(overrides)) => {
                fields.extend(overrides);
                Value::Object(fields)
            }
            (_, _, child_value) => child_value,
        };
        merged.insert(key, value);
    }

    merged
}

fn declared_parent(name: &str, document: &Map<String, Value>) -> Result<Option<String>, ProfileError> {
    match document.get(INHERITS_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(parent)) if !parent.trim().is_empty() => Ok(Some(parent.clone())),
        Some(_) => Err(ProfileError::SchemaInvalid {
            name: name.to_string(),
            errors: vec![format!("{}: must be a profile name string", INHERITS_KEY)],
        }),
    }
}

impl ProfileStore {
    /// Load every document on the inheritance chain, requested profile first.
    ///
    /// `base_override` replaces the requested profile's own `_inherits` for the
    /// first hop only. Revisiting any profile is a cycle, whatever its length.
    fn load_chain(
        &self,
        name: &str,
        base_override: Option<&str>,
    ) -> Result<Vec<(String, Map<String, Value>)>, ProfileError> {
        let mut visited = HashSet::new();
        let mut walked: Vec<String> = Vec::new();
        let mut documents = Vec::new();
        let mut first_hop_override = base_override.map(str::to_string);
        let mut current = name.to_string();

        loop {
            walked.push(current.clone());
            if !visited.insert(current.clone()) {
                tracing::warn!(
                    event = "core.profile.inheritance_cycle",
                    profile = %current,
                    chain = %walked.join(" -> ")
                );
                return Err(ProfileError::CircularInheritance {
                    profile: current,
                    chain: walked,
                });
            }

            let document = self.read_document(&current)?;
            let parent = match first_hop_override.take() {
                Some(parent) => Some(parent),
                None => declared_parent(&current, &document)?,
            };
            documents.push((current, document));

            match parent {
                Some(parent) => current = parent,
                None => return Ok(documents),
            }
        }
    }

    /// Profile names on the inheritance chain, requested profile first.
    pub fn inheritance_chain(
        &self,
        name: &str,
        base_override: Option<&str>,
    ) -> Result<Vec<String>, ProfileError> {
        Ok(self
            .load_chain(name, base_override)?
            .into_iter()
            .map(|(profile, _)| profile)
            .collect())
    }

    /// Effective configuration for `name` with its base profiles merged in.
    ///
    /// Without `_inherits` and without `base_override` this is exactly
    /// [`ProfileStore::read_profile`]. The result never carries `_inherits`.
    pub fn read_profile_with_inheritance(
        &self,
        name: &str,
        base_override: Option<&str>,
    ) -> Result<ProfileConfig, ProfileError> {
        // Each document is read exactly once; the standalone case reuses it.
        let mut chain = self.load_chain(name, base_override)?;
        if chain.len() == 1
            && base_override.is_none()
            && let Some((_, document)) = chain.pop()
        {
            return into_profile(name, Value::Object(document));
        }

        let depth = chain.len();

        let mut merged = chain
            .into_iter()
            .rev()
            .fold(Map::new(), |base, (_, child)| merge_profiles(base, child));
        merged.remove(INHERITS_KEY);

        tracing::info!(
            event = "core.profile.inheritance_resolved",
            profile = name,
            base_override = ?base_override,
            depth = depth
        );

        into_profile(name, Value::Object(merged))
    }
}
