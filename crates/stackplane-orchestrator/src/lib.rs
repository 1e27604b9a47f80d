//! # stackplane-orchestrator
//!
//! The multi-stack deployment orchestrator.
//!
//! Given a read-only stack-kind catalog, a set of requested kinds, and a
//! sequence of environment descriptors, [`Orchestrator::deploy`] resolves the
//! instantiation order once, then plans each environment independently:
//! every stack is instantiated in order with an input map assembled from
//! descriptor defaults and the exports of the stacks it depends on.
//!
//! The output is planning data only. The ordered, fully wired
//! [`StackInstance`] records are handed to a downstream synth/apply
//! collaborator; nothing here touches real infrastructure.
//!
//! [`Orchestrator::deploy`]: orchestrator::Orchestrator::deploy
//! [`StackInstance`]: instance::StackInstance

pub mod instance;
pub mod orchestrator;
pub mod report;

pub use instance::StackInstance;
pub use orchestrator::Orchestrator;
pub use report::{DeploymentReport, EnvironmentOutcome};
