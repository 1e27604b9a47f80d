//! Dependency graph management using `petgraph`.
//!
//! Builds a directed graph from stack-kind dependency declarations and
//! resolves a topological instantiation order for deployment.

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::StackKindId;

/// A dependency graph of stack kinds.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: petgraph::Graph<StackKindId, ()>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stack-kind node to the graph.
    pub fn add_kind(&mut self, id: StackKindId) -> NodeIndex {
        self.graph.add_node(id)
    }

    /// Adds a dependency edge: `dependent` depends on `dependency`.
    ///
    /// The edge points from `dependency` to `dependent` so that topological
    /// traversal yields dependencies first.
    pub fn add_dependency(&mut self, dependent: NodeIndex, dependency: NodeIndex) {
        let _ = self.graph.add_edge(dependency, dependent, ());
    }

    /// Returns the identifiers of every stack kind participating in a cycle,
    /// in insertion order. Empty for an acyclic graph.
    #[must_use]
    pub fn cycle_members(&self) -> Vec<StackKindId> {
        let mut members: Vec<NodeIndex> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .collect();
        members.sort_unstable();
        members
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// Returns the instantiation order: every stack kind after all the kinds
    /// it depends on.
    ///
    /// Kinds with no ordering constraint between them keep insertion order,
    /// so rendered plans stay stable between runs.
    ///
    /// # Errors
    ///
    /// Fails with `Cycle` naming the participants when the graph is cyclic.
    pub fn instantiation_order(&self) -> Result<Vec<StackKindId>> {
        let members = self.cycle_members();
        if !members.is_empty() {
            return Err(StackplaneError::Cycle {
                members: members.iter().map(ToString::to_string).collect(),
            });
        }

        // Kahn's algorithm with the ready set scanned in insertion order.
        let mut indegree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();
        let mut placed = vec![false; self.graph.node_count()];
        let mut order = Vec::with_capacity(self.graph.node_count());

        for _ in 0..self.graph.node_count() {
            let Some(next) = self
                .graph
                .node_indices()
                .find(|idx| !placed[idx.index()] && indegree[idx.index()] == 0)
            else {
                break;
            };
            placed[next.index()] = true;
            if let Some(id) = self.graph.node_weight(next) {
                order.push(id.clone());
            }
            for successor in self.graph.neighbors_directed(next, Direction::Outgoing) {
                indegree[successor.index()] -= 1;
            }
        }

        Ok(order)
    }
}
