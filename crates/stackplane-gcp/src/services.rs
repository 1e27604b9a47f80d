//! Project API enablement.
//!
//! Instead of clicking through the console to enable each API, this stack
//! declares them in one place and every resource-bearing stack deploys after
//! it. No single stack both keeps an API enabled and provisions resources
//! for it, so deleting a resource stack never disables an API the others
//! still use.

use serde_json::json;
use stackplane_catalog::stack::{InputRequirement, StackBody};
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::Result;
use stackplane_common::types::{StackKindId, ValueMap};

use crate::kinds;
use crate::state_bucket::EXPORT_STATE_BUCKET;

/// Export key: fully qualified service names enabled for the project.
pub const EXPORT_ENABLED_SERVICES: &str = "enabled_services";

/// APIs enabled for every environment. Storage, IAM, and KMS are already
/// enabled by the state-bucket stack.
pub const ENABLED_SERVICES: [&str; 8] = [
    "artifactregistry",
    "bigquery",
    "cloudfunctions",
    "eventarc",
    "firestore",
    "logging",
    "pubsub",
    "run",
];

/// Enables the project APIs the rest of the deployment relies on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServicesStack;

impl ServicesStack {
    /// Returns the fully qualified name of one service.
    #[must_use]
    pub fn qualified(service: &str) -> String {
        format!("{service}.googleapis.com")
    }
}

impl StackBody for ServicesStack {
    fn dependencies(&self) -> Vec<StackKindId> {
        vec![StackKindId::from(kinds::STATE_BUCKET)]
    }

    fn required_inputs(&self) -> Vec<InputRequirement> {
        vec![InputRequirement::new(kinds::STATE_BUCKET, EXPORT_STATE_BUCKET)]
    }

    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        inputs: &ValueMap,
    ) -> Result<ValueMap> {
        let enabled: Vec<String> = ENABLED_SERVICES.iter().map(|s| Self::qualified(s)).collect();
        tracing::debug!(
            environment = %descriptor.name,
            services = enabled.len(),
            "service enablement assembled"
        );

        let mut exports = ValueMap::new();
        let _ = exports.insert(EXPORT_ENABLED_SERVICES.into(), json!(enabled));
        // Pass the bucket through so dependents need not also depend on the
        // state-bucket stack.
        if let Some(bucket) = inputs.get(EXPORT_STATE_BUCKET) {
            let _ = exports.insert(EXPORT_STATE_BUCKET.into(), bucket.clone());
        }
        Ok(exports)
    }
}
