//! The stack-body contract: what a stack kind declares and how it is built.
//!
//! Bodies are pure configuration assembly. `initialize` reads the resolved
//! input mapping and returns the exports other stacks may depend on; any
//! cloud-provider interaction belongs to the downstream apply collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::error::Result;
use stackplane_common::types::{StackKindId, ValueMap};

/// A declared input the orchestrator must satisfy from a dependency's
/// exports before the stack is instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRequirement {
    /// The dependency stack kind that produces the value.
    pub from: StackKindId,
    /// The export key to read from that dependency.
    pub key: String,
}

impl InputRequirement {
    /// Creates a requirement for `key` exported by `from`.
    #[must_use]
    pub fn new(from: impl Into<StackKindId>, key: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            key: key.into(),
        }
    }
}

/// Behavior contract implemented by every stack kind's body.
pub trait StackBody: Send + Sync {
    /// Stack kinds this body depends on, consulted by the resolver before
    /// any instantiation occurs.
    fn dependencies(&self) -> Vec<StackKindId>;

    /// Inputs this body needs from its dependencies' exports.
    ///
    /// Descriptor-derived defaults are always provided and need not be
    /// declared here.
    fn required_inputs(&self) -> Vec<InputRequirement> {
        Vec::new()
    }

    /// Assembles the stack's configuration and returns its exports.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved inputs are invalid for this body.
    fn initialize(
        &self,
        descriptor: &EnvironmentDescriptor,
        inputs: &ValueMap,
    ) -> Result<ValueMap>;
}

/// A registered stack kind: identifier plus body.
pub struct StackKind {
    id: StackKindId,
    body: Box<dyn StackBody>,
}

impl StackKind {
    pub(crate) fn new(id: StackKindId, body: Box<dyn StackBody>) -> Self {
        Self { id, body }
    }

    /// The catalog-unique identifier of this stack kind.
    #[must_use]
    pub fn id(&self) -> &StackKindId {
        &self.id
    }

    /// The instantiation body.
    #[must_use]
    pub fn body(&self) -> &dyn StackBody {
        self.body.as_ref()
    }

    /// Shorthand for `body().dependencies()`.
    #[must_use]
    pub fn dependencies(&self) -> Vec<StackKindId> {
        self.body.dependencies()
    }
}

impl fmt::Debug for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackKind")
            .field("id", &self.id)
            .field("dependencies", &self.body.dependencies())
            .finish_non_exhaustive()
    }
}
