//! bwh-core: profile configuration and deployment tracking for the Benchling
//! webhook integration
//!
//! Stores named configuration profiles (default/production, dev, staging, ...)
//! under a local directory tree, validates them against a closed schema,
//! resolves profile inheritance, and keeps a per-profile deployment log. It
//! provisions nothing and makes no network calls. It is used by the CLI.
//!
//! # Main Entry Points
//!
//! - [`profiles`] - Read, write, list, delete and resolve profiles
//! - [`deployments`] - Record and query deployment history
//! - [`config`] - Base directory resolution

pub mod config;
pub mod deployments;
pub mod errors;
pub mod events;
pub mod logging;
pub mod profiles;
pub mod storage;

// Re-export commonly used types at crate root for convenience
pub use config::{DEFAULT_PROFILE, StoreConfig};
pub use deployments::{DeploymentError, DeploymentHistory, DeploymentRecord, DeploymentTracker};
pub use errors::{BwhError, ConfigError};
pub use profiles::{ProfileConfig, ProfileError, ProfileStore, ValidationResult, validate_profile};

// Re-export logging initialization
pub use logging::init_logging;
