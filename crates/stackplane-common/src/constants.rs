//! Well-known input keys and location defaults.

/// Input keys seeded into every stack's input map from the environment
/// descriptor.
pub mod keys {
    /// Environment name.
    pub const ENVIRONMENT: &str = "environment";
    /// Whether the environment is production.
    pub const IS_PROD: &str = "is_prod";
    /// Cloud project identifier.
    pub const PROJECT_ID: &str = "project_id";
    /// Numeric cloud project number.
    pub const PROJECT_NUMBER: &str = "project_number";
    /// Human-readable cloud project name.
    pub const PROJECT_NAME: &str = "project_name";
    /// Deployment region.
    pub const REGION: &str = "region";
    /// Deployment zone within the region.
    pub const ZONE: &str = "zone";
    /// Multi-region location for storage resources.
    pub const LOCATION: &str = "location";
}

/// Default multi-region location for storage resources.
pub const DEFAULT_LOCATION: &str = "US";

/// Default deployment region.
pub const DEFAULT_REGION: &str = "us-central1";

/// Default zone within the default region.
pub const DEFAULT_ZONE: &str = "us-central1-a";

/// Default Firestore location id (multi-regional North America).
pub const DEFAULT_DATABASE_LOCATION: &str = "nam5";

/// Application name used in generated resource names and log output.
pub const APP_NAME: &str = "stackplane";
