//! Cloud Run compute service assembly.
//!
//! Wires the container image reference from the registry's exported pull
//! path and derives the runtime service account for the environment.

use serde_json::json;
use stackplane_catalog::stack::{InputRequirement, StackBody};
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::{StackKindId, ValueMap};

use crate::kinds;
use crate::registry::EXPORT_REGISTRY_PATH;
use crate::services::EXPORT_ENABLED_SERVICES;

/// Export key: the deployed service name.
pub const EXPORT_SERVICE_NAME: &str = "service_name";

/// Export key: email of the runtime service account.
pub const EXPORT_SERVICE_ACCOUNT: &str = "service_account";

/// Export key: full container image reference.
pub const EXPORT_IMAGE: &str = "image";

/// Export key: maximum instance count for the service.
pub const EXPORT_MAX_SCALE: &str = "max_scale";

/// Export key: container port the service listens on.
pub const EXPORT_PORT: &str = "port";

/// Export key: secret ids the runtime service account may access.
pub const EXPORT_SECRETS: &str = "secrets";

/// Account id of the service account that runs the server.
pub const RUNTIME_ACCOUNT_ID: &str = "cloud-run-server";

/// Assembles the Cloud Run service for an environment.
#[derive(Debug, Clone)]
pub struct CloudRunStack {
    service_name: String,
    image_name: String,
    image_tag: String,
    port: u16,
    max_scale: u32,
    secrets: Vec<String>,
}

impl CloudRunStack {
    /// Creates a Cloud Run stack for `service_name` running `image_name`.
    #[must_use]
    pub fn new(service_name: impl Into<String>, image_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            image_name: image_name.into(),
            image_tag: "latest".into(),
            port: 8080,
            max_scale: 1,
            secrets: Vec::new(),
        }
    }

    /// Overrides the image tag deployed to the service.
    #[must_use]
    pub fn image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    /// Sets the container port the service listens on.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the maximum instance count. Non-production environments are
    /// capped at one instance regardless.
    #[must_use]
    pub const fn max_scale(mut self, max_scale: u32) -> Self {
        self.max_scale = max_scale;
        self
    }

    /// Grants the runtime service account access to a named secret.
    #[must_use]
    pub fn secret(mut self, secret_id: impl Into<String>) -> Self {
        self.secrets.push(secret_id.into());
        self
    }
}

impl Default for CloudRunStack {
    fn default() -> Self {
        Self::new("api-server", "api").secret("API_DATABASE_URL")
    }
}

impl StackBody for CloudRunStack {
    fn dependencies(&self) -> Vec<StackKindId> {
        vec![
            StackKindId::from(kinds::SERVICES),
            StackKindId::from(kinds::REGISTRY),
        ]
    }

    fn required_inputs(&self) -> Vec<InputRequirement> {
        vec![
            InputRequirement::new(kinds::SERVICES, EXPORT_ENABLED_SERVICES),
            InputRequirement::new(kinds::REGISTRY, EXPORT_REGISTRY_PATH),
        ]
    }

    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        inputs: &ValueMap,
    ) -> Result<ValueMap> {
        let registry_path = inputs
            .get(EXPORT_REGISTRY_PATH)
            .and_then(|v| v.as_str())
            .ok_or_else(|| StackplaneError::Config {
                message: format!(
                    "environment \"{}\": input \"{EXPORT_REGISTRY_PATH}\" is not a string",
                    descriptor.name
                ),
            })?;
        if self.port == 0 {
            return Err(StackplaneError::Config {
                message: format!(
                    "environment \"{}\": service \"{}\" has port 0",
                    descriptor.name, self.service_name
                ),
            });
        }

        let image = format!("{registry_path}/{}:{}", self.image_name, self.image_tag);
        let service_account = format!(
            "{RUNTIME_ACCOUNT_ID}@{}.iam.gserviceaccount.com",
            descriptor.project_id
        );
        let max_scale = if descriptor.is_prod {
            self.max_scale
        } else {
            self.max_scale.min(1)
        };
        tracing::debug!(
            environment = %descriptor.name,
            service = %self.service_name,
            %image,
            "compute service assembled"
        );

        let mut exports = ValueMap::new();
        let _ = exports.insert(EXPORT_SERVICE_NAME.into(), json!(self.service_name));
        let _ = exports.insert(EXPORT_SERVICE_ACCOUNT.into(), json!(service_account));
        let _ = exports.insert(EXPORT_IMAGE.into(), json!(image));
        let _ = exports.insert(EXPORT_MAX_SCALE.into(), json!(max_scale));
        let _ = exports.insert(EXPORT_PORT.into(), json!(self.port));
        let _ = exports.insert(EXPORT_SECRETS.into(), json!(self.secrets));
        Ok(exports)
    }
}
