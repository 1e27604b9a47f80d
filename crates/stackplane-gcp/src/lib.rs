//! # stackplane-gcp
//!
//! Builtin GCP stack bodies: the stacks one deployment environment is made
//! of, expressed as pure configuration assembly. Each body derives its
//! exports from the environment descriptor and its dependencies' exports;
//! actual provisioning belongs to the downstream apply engine.
//!
//! Handles:
//! - **State bucket**: Terraform state storage, the root of the graph.
//! - **Services**: project API enablement.
//! - **Database**: Firestore database configuration.
//! - **Registry**: Artifact Registry repositories and image paths.
//! - **Cloud Run**: the compute service wired to the registry path.

pub mod cloud_run;
pub mod database;
pub mod registry;
pub mod services;
pub mod state_bucket;

use stackplane_catalog::catalog::StackCatalog;
use stackplane_common::error::Result;

/// Identifiers of the builtin stack kinds.
pub mod kinds {
    /// Terraform state storage.
    pub const STATE_BUCKET: &str = "state-bucket";
    /// Project API enablement.
    pub const SERVICES: &str = "services";
    /// Firestore database.
    pub const DATABASE: &str = "database";
    /// Artifact Registry repositories.
    pub const REGISTRY: &str = "registry";
    /// Cloud Run compute service.
    pub const COMPUTE: &str = "compute";
}

/// Builds a catalog holding all five builtin stack kinds.
///
/// # Errors
///
/// Propagates registration failures from the catalog.
pub fn builtin_catalog() -> Result<StackCatalog> {
    let mut catalog = StackCatalog::new();
    catalog.register(kinds::STATE_BUCKET, Box::new(state_bucket::StateBucketStack))?;
    catalog.register(kinds::SERVICES, Box::new(services::ServicesStack))?;
    catalog.register(kinds::DATABASE, Box::new(database::DatabaseStack::default()))?;
    catalog.register(kinds::REGISTRY, Box::new(registry::RegistryStack::default()))?;
    catalog.register(kinds::COMPUTE, Box::new(cloud_run::CloudRunStack::default()))?;
    Ok(catalog)
}
