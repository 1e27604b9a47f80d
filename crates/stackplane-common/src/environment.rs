//! Deployment environment descriptors.
//!
//! An environment is an isolated deployment target (dev, staging, prod) with
//! its own project identity and geographic placement. Descriptors are built
//! once at process start and never mutated afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::constants::keys;
use crate::error::{Result, StackplaneError};
use crate::types::ValueMap;

/// The settings specific to one deployment environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    /// The unique, human-readable name for this environment.
    pub name: String,
    /// Whether or not this environment is production.
    pub is_prod: bool,
    /// The cloud project id for this environment.
    pub project_id: String,
    /// The numeric cloud project number.
    pub project_number: u64,
    /// The cloud project name (may differ from the project id).
    pub project_name: String,
    /// The deployment region.
    pub region: String,
    /// The deployment zone within the region.
    pub zone: String,
    /// The multi-region location for storage resources.
    pub location: String,
}

impl EnvironmentDescriptor {
    /// Checks that the identity and placement fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", &self.name),
            ("project_id", &self.project_id),
            ("project_name", &self.project_name),
            ("region", &self.region),
            ("zone", &self.zone),
            ("location", &self.location),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(StackplaneError::Config {
                    message: format!(
                        "environment \"{}\": field \"{field}\" must not be empty",
                        self.name
                    ),
                });
            }
        }
        Ok(())
    }

    /// Descriptor-derived default inputs seeded into every stack's input map
    /// before dependency exports are merged in.
    #[must_use]
    pub fn default_inputs(&self) -> ValueMap {
        let mut inputs = ValueMap::new();
        let _ = inputs.insert(keys::ENVIRONMENT.into(), json!(self.name));
        let _ = inputs.insert(keys::IS_PROD.into(), json!(self.is_prod));
        let _ = inputs.insert(keys::PROJECT_ID.into(), json!(self.project_id));
        let _ = inputs.insert(keys::PROJECT_NUMBER.into(), json!(self.project_number));
        let _ = inputs.insert(keys::PROJECT_NAME.into(), json!(self.project_name));
        let _ = inputs.insert(keys::REGION.into(), json!(self.region));
        let _ = inputs.insert(keys::ZONE.into(), json!(self.zone));
        let _ = inputs.insert(keys::LOCATION.into(), json!(self.location));
        inputs
    }
}

/// Checks that environment names are unique across the configured set.
///
/// # Errors
///
/// Returns a `Config` error naming the first duplicated name.
pub fn ensure_unique_names(environments: &[EnvironmentDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for descriptor in environments {
        if !seen.insert(descriptor.name.as_str()) {
            return Err(StackplaneError::Config {
                message: format!("duplicate environment name: \"{}\"", descriptor.name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants;

    fn make_descriptor(name: &str) -> EnvironmentDescriptor {
        EnvironmentDescriptor {
            name: name.into(),
            is_prod: false,
            project_id: format!("acme-{name}"),
            project_number: 123_456_789_012,
            project_name: format!("acme-{name}"),
            region: constants::DEFAULT_REGION.into(),
            zone: constants::DEFAULT_ZONE.into(),
            location: constants::DEFAULT_LOCATION.into(),
        }
    }

    #[test]
    fn valid_descriptor_passes() {
        assert!(make_descriptor("dev").validate().is_ok());
    }

    #[test]
    fn empty_project_id_is_rejected() {
        let mut descriptor = make_descriptor("dev");
        descriptor.project_id = String::new();
        let err = descriptor.validate().expect_err("should fail");
        assert!(err.to_string().contains("project_id"), "got: {err}");
    }

    #[test]
    fn whitespace_region_is_rejected() {
        let mut descriptor = make_descriptor("dev");
        descriptor.region = "   ".into();
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn default_inputs_cover_every_descriptor_field() {
        let inputs = make_descriptor("dev").default_inputs();
        for key in [
            keys::ENVIRONMENT,
            keys::IS_PROD,
            keys::PROJECT_ID,
            keys::PROJECT_NUMBER,
            keys::PROJECT_NAME,
            keys::REGION,
            keys::ZONE,
            keys::LOCATION,
        ] {
            assert!(inputs.contains_key(key), "missing key {key}");
        }
        assert_eq!(inputs[keys::ENVIRONMENT], json!("dev"));
        assert_eq!(inputs[keys::IS_PROD], json!(false));
    }

    #[test]
    fn unique_names_accepts_distinct_environments() {
        let environments = vec![make_descriptor("dev"), make_descriptor("prod")];
        assert!(ensure_unique_names(&environments).is_ok());
    }

    #[test]
    fn unique_names_rejects_duplicates() {
        let environments = vec![make_descriptor("dev"), make_descriptor("dev")];
        let err = ensure_unique_names(&environments).expect_err("should fail");
        assert!(err.to_string().contains("dev"), "got: {err}");
    }
}
