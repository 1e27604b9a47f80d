//! Per-run deployment report: one outcome per environment.
//!
//! A failed environment is reported alongside the successful ones instead of
//! turning the whole run into an error.

use stackplane_common::error::StackplaneError;

use crate::instance::StackInstance;

/// Result of one orchestration run across every configured environment.
#[derive(Debug)]
pub struct DeploymentReport {
    /// One outcome per environment, in the order the environments were given.
    pub environments: Vec<EnvironmentOutcome>,
}

impl DeploymentReport {
    /// Returns the outcome recorded for `environment`, if any.
    #[must_use]
    pub fn outcome(&self, environment: &str) -> Option<&EnvironmentOutcome> {
        self.environments.iter().find(|o| o.name() == environment)
    }

    /// Returns whether every environment deployed successfully.
    #[must_use]
    pub fn all_deployed(&self) -> bool {
        self.environments.iter().all(EnvironmentOutcome::is_deployed)
    }
}

/// The outcome of one environment's deployment pass.
#[derive(Debug)]
pub enum EnvironmentOutcome {
    /// Every requested stack was wired and instantiated.
    Deployed {
        /// Environment name.
        name: String,
        /// Instances in instantiation order.
        instances: Vec<StackInstance>,
    },
    /// The pass was aborted; other environments are unaffected.
    Failed {
        /// Environment name.
        name: String,
        /// The error that aborted the pass.
        error: StackplaneError,
    },
}

impl EnvironmentOutcome {
    /// The environment this outcome belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Deployed { name, .. } | Self::Failed { name, .. } => name,
        }
    }

    /// Returns whether the pass completed.
    #[must_use]
    pub const fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed { .. })
    }

    /// The instances of a completed pass, in instantiation order.
    #[must_use]
    pub fn instances(&self) -> Option<&[StackInstance]> {
        match self {
            Self::Deployed { instances, .. } => Some(instances),
            Self::Failed { .. } => None,
        }
    }

    /// The error of an aborted pass.
    #[must_use]
    pub const fn error(&self) -> Option<&StackplaneError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Deployed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lookup_by_environment_name() {
        let report = DeploymentReport {
            environments: vec![
                EnvironmentOutcome::Deployed {
                    name: "dev".into(),
                    instances: Vec::new(),
                },
                EnvironmentOutcome::Failed {
                    name: "prod".into(),
                    error: StackplaneError::NotFound { id: "ghost".into() },
                },
            ],
        };

        assert!(report.outcome("dev").is_some_and(EnvironmentOutcome::is_deployed));
        assert!(report.outcome("prod").is_some_and(|o| !o.is_deployed()));
        assert!(report.outcome("staging").is_none());
        assert!(!report.all_deployed());
    }

    #[test]
    fn failed_outcome_exposes_error_and_no_instances() {
        let outcome = EnvironmentOutcome::Failed {
            name: "dev".into(),
            error: StackplaneError::MissingExport {
                environment: "dev".into(),
                dependency: "registry".into(),
                key: "registry_path".into(),
            },
        };
        assert!(outcome.instances().is_none());
        assert!(matches!(
            outcome.error(),
            Some(StackplaneError::MissingExport { .. })
        ));
    }
}
