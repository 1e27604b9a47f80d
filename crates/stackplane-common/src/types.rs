//! Domain primitive types used across the Stackplane workspace.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a stack kind within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackKindId(String);

impl StackKindId {
    /// Creates a new stack-kind identifier from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackKindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StackKindId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for StackKindId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Named values exchanged between stacks, used for both resolved inputs and
/// produced exports.
///
/// A `BTreeMap` keeps iteration order deterministic so rendered plans stay
/// stable between runs.
pub type ValueMap = BTreeMap<String, serde_json::Value>;
