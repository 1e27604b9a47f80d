//! Materialized stack instances: the records handed to the downstream
//! synth/apply collaborator.

use serde::{Deserialize, Serialize};
use stackplane_common::types::{StackKindId, ValueMap};

/// One concrete materialization of a stack kind for a specific environment.
///
/// Created at most once per (environment, stack kind) pair; its exports are
/// readable by later stacks within the same environment pass only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackInstance {
    /// Name of the environment this instance belongs to.
    pub environment: String,
    /// The stack kind this instance materializes.
    pub kind: StackKindId,
    /// Input values resolved from descriptor defaults and dependency exports.
    pub inputs: ValueMap,
    /// Export values produced by the stack body.
    pub exports: ValueMap,
}

impl StackInstance {
    /// Reads one export value by key.
    #[must_use]
    pub fn export(&self, key: &str) -> Option<&serde_json::Value> {
        self.exports.get(key)
    }

    /// Reads one resolved input value by key.
    #[must_use]
    pub fn input(&self, key: &str) -> Option<&serde_json::Value> {
        self.inputs.get(key)
    }
}
