pub mod errors;
pub mod tracker;
pub mod types;
pub mod validation;

// Re-export commonly used types at module level
pub use errors::DeploymentError;
pub use tracker::DeploymentTracker;
pub use types::{DeploymentHistory, DeploymentRecord};
pub use validation::{validate_deployment_history, validate_record};
