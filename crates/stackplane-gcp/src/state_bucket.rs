//! Terraform state storage for an environment.
//!
//! Every other stack keeps its engine state in this bucket, so it carries no
//! dependencies and always deploys first.

use serde_json::json;
use stackplane_catalog::stack::StackBody;
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::Result;
use stackplane_common::types::{StackKindId, ValueMap};

/// Export key: name of the state bucket.
pub const EXPORT_STATE_BUCKET: &str = "state_bucket";

/// Export key: multi-region location the bucket lives in.
pub const EXPORT_STATE_LOCATION: &str = "state_location";

/// Derives the environment's state bucket from the project identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateBucketStack;

impl StackBody for StateBucketStack {
    fn dependencies(&self) -> Vec<StackKindId> {
        Vec::new()
    }

    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        _inputs: &ValueMap,
    ) -> Result<ValueMap> {
        let bucket = format!("{}-terraform-state", descriptor.project_id);
        tracing::debug!(environment = %descriptor.name, %bucket, "state bucket assembled");

        let mut exports = ValueMap::new();
        let _ = exports.insert(EXPORT_STATE_BUCKET.into(), json!(bucket));
        let _ = exports.insert(EXPORT_STATE_LOCATION.into(), json!(descriptor.location));
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
    use stackplane_common::constants;

    use super::*;

    fn make_descriptor() -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            name: "dev".into(),
            is_prod: false,
            project_id: "acme-dev".into(),
            project_number: 123_456_789_012,
            project_name: "acme-dev".into(),
            region: constants::DEFAULT_REGION.into(),
            zone: constants::DEFAULT_ZONE.into(),
            location: constants::DEFAULT_LOCATION.into(),
        }
    }

    #[test]
    fn bucket_name_derives_from_project_id() {
        let exports = StateBucketStack
            .initialize(&make_descriptor(), &ValueMap::new())
            .expect("initialize");
        assert_eq!(
            exports[EXPORT_STATE_BUCKET],
            json!("acme-dev-terraform-state")
        );
        assert_eq!(exports[EXPORT_STATE_LOCATION], json!("US"));
    }

    #[test]
    fn has_no_dependencies() {
        assert!(StateBucketStack.dependencies().is_empty());
        assert!(StateBucketStack.required_inputs().is_empty());
    }
}
