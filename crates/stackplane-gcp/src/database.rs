//! Firestore database configuration.
//!
//! The backing store for the application. Firestore allows exactly one
//! `(default)` database per project, so the stack exports the fixed name
//! together with its location.

use serde_json::json;
use stackplane_catalog::stack::{InputRequirement, StackBody};
use stackplane_common::constants;
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::{StackKindId, ValueMap};

use crate::kinds;
use crate::services::{EXPORT_ENABLED_SERVICES, ServicesStack};

/// Export key: the database name.
pub const EXPORT_DATABASE_NAME: &str = "database_name";

/// Export key: the database location id.
pub const EXPORT_DATABASE_LOCATION: &str = "database_location";

/// The only database name Firestore accepts for the per-project default.
pub const DEFAULT_DATABASE_NAME: &str = "(default)";

/// Assembles the Firestore database for an environment.
#[derive(Debug, Clone)]
pub struct DatabaseStack {
    location_id: String,
}

impl DatabaseStack {
    /// Creates a database stack pinned to `location_id`.
    #[must_use]
    pub fn new(location_id: impl Into<String>) -> Self {
        Self {
            location_id: location_id.into(),
        }
    }
}

impl Default for DatabaseStack {
    fn default() -> Self {
        Self::new(constants::DEFAULT_DATABASE_LOCATION)
    }
}

impl StackBody for DatabaseStack {
    fn dependencies(&self) -> Vec<StackKindId> {
        vec![StackKindId::from(kinds::SERVICES)]
    }

    fn required_inputs(&self) -> Vec<InputRequirement> {
        vec![InputRequirement::new(kinds::SERVICES, EXPORT_ENABLED_SERVICES)]
    }

    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        inputs: &ValueMap,
    ) -> Result<ValueMap> {
        let firestore = ServicesStack::qualified("firestore");
        let enabled = inputs
            .get(EXPORT_ENABLED_SERVICES)
            .and_then(|v| v.as_array())
            .is_some_and(|services| {
                services.iter().any(|s| s.as_str() == Some(firestore.as_str()))
            });
        if !enabled {
            return Err(StackplaneError::Config {
                message: format!(
                    "environment \"{}\": \"{firestore}\" is not in the enabled service list",
                    descriptor.name
                ),
            });
        }

        tracing::debug!(
            environment = %descriptor.name,
            location = %self.location_id,
            "database assembled"
        );

        let mut exports = ValueMap::new();
        let _ = exports.insert(EXPORT_DATABASE_NAME.into(), json!(DEFAULT_DATABASE_NAME));
        let _ = exports.insert(EXPORT_DATABASE_LOCATION.into(), json!(self.location_id));
        Ok(exports)
    }
}

#[cfg(test)]
mod tests {
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

    fn inputs_with_firestore() -> ValueMap {
        let mut inputs = ValueMap::new();
        let _ = inputs.insert(
            EXPORT_ENABLED_SERVICES.into(),
            json!(["firestore.googleapis.com", "run.googleapis.com"]),
        );
        inputs
    }

    #[test]
    fn exports_default_name_and_location() {
        let exports = DatabaseStack::default()
            .initialize(&make_descriptor(), &inputs_with_firestore())
            .expect("initialize");
        assert_eq!(exports[EXPORT_DATABASE_NAME], json!("(default)"));
        assert_eq!(exports[EXPORT_DATABASE_LOCATION], json!("nam5"));
    }

    #[test]
    fn custom_location_is_exported() {
        let exports = DatabaseStack::new("eur3")
            .initialize(&make_descriptor(), &inputs_with_firestore())
            .expect("initialize");
        assert_eq!(exports[EXPORT_DATABASE_LOCATION], json!("eur3"));
    }

    #[test]
    fn rejects_inputs_without_the_firestore_api() {
        let mut inputs = ValueMap::new();
        let _ = inputs.insert(EXPORT_ENABLED_SERVICES.into(), json!(["run.googleapis.com"]));
        let err = DatabaseStack::default()
            .initialize(&make_descriptor(), &inputs)
            .expect_err("should fail");
        assert!(err.to_string().contains("firestore"), "got: {err}");
    }
}
