//! Artifact Registry repositories and image paths.
//!
//! Exports the pull path for the primary repository plus a map covering
//! every configured repository, so dependents read a typed export instead of
//! rebuilding the path themselves.

use serde::{Deserialize, Serialize};
use serde_json::json;
use stackplane_catalog::stack::{InputRequirement, StackBody};
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::{StackKindId, ValueMap};

use crate::kinds;
use crate::services::EXPORT_ENABLED_SERVICES;

/// Export key: pull path of the primary repository.
pub const EXPORT_REGISTRY_PATH: &str = "registry_path";

/// Export key: map of repository id to pull path.
pub const EXPORT_REPOSITORIES: &str = "repositories";

/// Repository id used when no repositories are configured explicitly.
pub const DEFAULT_REPOSITORY: &str = "api-server";

/// Repository formats accepted by Artifact Registry.
///
/// The API rejects anything that is not exactly one of these values, so the
/// variants are closed here instead of passing strings through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegistryFormat {
    /// Docker container images.
    #[default]
    Docker,
    /// Maven artifacts.
    Maven,
    /// npm packages.
    Npm,
    /// Python packages.
    Python,
    /// APT packages.
    Apt,
    /// YUM packages.
    Yum,
    /// Kubeflow pipelines.
    Kubeflow,
    /// Go modules.
    Go,
}

impl RegistryFormat {
    /// The exact value the Artifact Registry API expects.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Docker => "DOCKER",
            Self::Maven => "MAVEN",
            Self::Npm => "NPM",
            Self::Python => "PYTHON",
            Self::Apt => "APT",
            Self::Yum => "YUM",
            Self::Kubeflow => "KFP",
            Self::Go => "GO",
        }
    }
}

/// The settings for one repository to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Repository id, unique within the registry.
    pub id: String,
    /// Console-visible description.
    pub description: String,
    /// Artifact format stored in the repository.
    pub format: RegistryFormat,
}

/// Assembles the Artifact Registry repositories for an environment.
///
/// The first configured repository is the primary one whose path is exported
/// under [`EXPORT_REGISTRY_PATH`].
#[derive(Debug, Clone)]
pub struct RegistryStack {
    repositories: Vec<RegistrySettings>,
}

impl RegistryStack {
    /// Creates a registry stack over `repositories`.
    #[must_use]
    pub const fn new(repositories: Vec<RegistrySettings>) -> Self {
        Self { repositories }
    }

    fn pull_path(descriptor: &EnvironmentDescriptor, repository: &str) -> String {
        format!(
            "{}-docker.pkg.dev/{}/{repository}",
            descriptor.region, descriptor.project_id
        )
    }
}

impl Default for RegistryStack {
    fn default() -> Self {
        Self::new(vec![RegistrySettings {
            id: DEFAULT_REPOSITORY.into(),
            description: "Container images for the API server".into(),
            format: RegistryFormat::Docker,
        }])
    }
}

impl StackBody for RegistryStack {
    fn dependencies(&self) -> Vec<StackKindId> {
        vec![StackKindId::from(kinds::SERVICES)]
    }

    fn required_inputs(&self) -> Vec<InputRequirement> {
        vec![InputRequirement::new(kinds::SERVICES, EXPORT_ENABLED_SERVICES)]
    }

    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        _inputs: &ValueMap,
    ) -> Result<ValueMap> {
        let Some(primary) = self.repositories.first() else {
            return Err(StackplaneError::Config {
                message: format!(
                    "environment \"{}\": registry stack has no repositories configured",
                    descriptor.name
                ),
            });
        };

        let mut paths = ValueMap::new();
        for settings in &self.repositories {
            let _ = paths.insert(
                settings.id.clone(),
                json!(Self::pull_path(descriptor, &settings.id)),
            );
        }
        tracing::debug!(
            environment = %descriptor.name,
            repositories = paths.len(),
            "registry assembled"
        );

        let mut exports = ValueMap::new();
        let _ = exports.insert(
            EXPORT_REGISTRY_PATH.into(),
            json!(Self::pull_path(descriptor, &primary.id)),
        );
        let _ = exports.insert(EXPORT_REPOSITORIES.into(), json!(paths));
        Ok(exports)
    }
}
