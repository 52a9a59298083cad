pub mod errors;
pub mod inheritance;
pub mod layout;
pub mod migration;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types at module level
pub use errors::ProfileError;
pub use inheritance::merge_profiles;
pub use layout::{ProfilePaths, is_valid_profile_name};
pub use migration::detect_legacy_config;
pub use store::ProfileStore;
pub use types::{
    BenchlingConfig, ConfigSource, DeploymentConfig, LogLevel, LoggingConfig, PackageConfig,
    ProfileConfig, ProfileMetadata, QuiltConfig, SecurityConfig, ValidationResult,
};
pub use validation::{validate_config, validate_overlay, validate_profile};
