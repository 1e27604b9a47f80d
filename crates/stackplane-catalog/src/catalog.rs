//! The stack-kind catalog: the fixed list of stack kinds available to deploy.
//!
//! Populated once during startup configuration and read-only for the rest of
//! the process lifetime; concurrent reads are safe. Registration order is
//! preserved so everything derived from iteration stays deterministic.

use std::collections::HashMap;

use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::StackKindId;

use crate::stack::{StackBody, StackKind};

/// Registry of stack kinds, constructed once and passed by reference into
/// the orchestrator.
#[derive(Debug, Default)]
pub struct StackCatalog {
    kinds: Vec<StackKind>,
    index: HashMap<StackKindId, usize>,
}

impl StackCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stack kind under `id`.
    ///
    /// Registration is all-or-nothing: the catalog is left unchanged on
    /// failure.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateStackKind` if `id` is already registered, and
    /// with `Cycle` if the body declares a dependency on itself.
    pub fn register(&mut self, id: impl Into<StackKindId>, body: Box<dyn StackBody>) -> Result<()> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(StackplaneError::DuplicateStackKind { id: id.to_string() });
        }
        if body.dependencies().contains(&id) {
            return Err(StackplaneError::Cycle {
                members: vec![id.to_string()],
            });
        }
        tracing::debug!(kind = %id, "registering stack kind");
        let _ = self.index.insert(id.clone(), self.kinds.len());
        self.kinds.push(StackKind::new(id, body));
        Ok(())
    }

    /// Looks up a stack kind by identifier.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if the identifier was never registered.
    pub fn lookup(&self, id: &StackKindId) -> Result<&StackKind> {
        self.index
            .get(id)
            .and_then(|&slot| self.kinds.get(slot))
            .ok_or_else(|| StackplaneError::NotFound { id: id.to_string() })
    }

    /// Returns whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &StackKindId) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates registered identifiers in registration order.
    pub fn all(&self) -> impl Iterator<Item = &StackKindId> {
        self.kinds.iter().map(StackKind::id)
    }

    /// Number of registered stack kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns whether the catalog holds no stack kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
