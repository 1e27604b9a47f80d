//! Unified error types for the Stackplane workspace.
//!
//! Graph-structural variants (`Cycle`, `UnknownDependency`,
//! `DuplicateStackKind`) are always fatal to a whole run; `MissingExport` and
//! `StackInstantiation` are scoped to the environment whose pass raised them.

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StackplaneError {
    /// A dependency cycle was detected among stack kinds.
    #[error("dependency cycle among stack kinds: {}", members.join(", "))]
    Cycle {
        /// Identifiers of every stack kind participating in the cycle.
        members: Vec<String>,
    },

    /// A declared dependency references a stack kind absent from the catalog.
    #[error("stack kind \"{declared_by}\" depends on unknown stack kind \"{dependency}\"")]
    UnknownDependency {
        /// The stack kind that declared the dependency.
        declared_by: String,
        /// The missing dependency identifier.
        dependency: String,
    },

    /// A stack kind identifier was registered twice.
    #[error("stack kind \"{id}\" is already registered")]
    DuplicateStackKind {
        /// The identifier that was registered twice.
        id: String,
    },

    /// A declared dependency never produced a required export.
    #[error(
        "environment \"{environment}\": dependency \"{dependency}\" produced no export \"{key}\""
    )]
    MissingExport {
        /// Environment whose deployment pass failed.
        environment: String,
        /// The dependency stack kind that should have produced the export.
        dependency: String,
        /// The unmet input key.
        key: String,
    },

    /// A stack body reported an error while initializing.
    #[error("environment \"{environment}\": stack kind \"{kind}\" failed to initialize: {message}")]
    StackInstantiation {
        /// Environment whose deployment pass failed.
        environment: String,
        /// The stack kind whose body failed.
        kind: String,
        /// Failure description reported by the body.
        message: String,
    },

    /// A catalog lookup missed.
    #[error("stack kind not found: {id}")]
    NotFound {
        /// Identifier of the missing stack kind.
        id: String,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StackplaneError>;
