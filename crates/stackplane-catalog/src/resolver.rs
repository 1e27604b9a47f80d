//! Instantiation-order resolution for a requested set of stack kinds.
//!
//! A pure function of the catalog and the request: it builds a fresh graph,
//! checks every declared dependency against the catalog, and rejects cycles
//! before any stack is instantiated.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::StackKindId;

use crate::catalog::StackCatalog;
use crate::graph::DependencyGraph;

/// Resolves the instantiation order for `requested` against `catalog`.
///
/// Only the requested kinds appear in the output order; the request may be a
/// subset of the catalog. Structural validation walks the full transitive
/// dependency closure of the request, so a cycle or an unknown dependency is
/// reported even when some of the kinds involved were not requested.
/// Duplicate requests collapse to their first occurrence, and kinds with no
/// ordering constraint between them keep request order, so two resolutions
/// of the same request produce identical output.
///
/// # Errors
///
/// Fails with `NotFound` if a requested kind is not in the catalog, with
/// `UnknownDependency` naming the missing identifier if a declared
/// dependency anywhere in the closure is not in the catalog, and with
/// `Cycle` naming the participants if the closure is cyclic.
pub fn resolve_order(
    catalog: &StackCatalog,
    requested: &[StackKindId],
) -> Result<Vec<StackKindId>> {
    let mut graph = DependencyGraph::new();
    let mut nodes: HashMap<StackKindId, NodeIndex> = HashMap::new();
    let mut pending: VecDeque<StackKindId> = VecDeque::new();

    // Requested nodes first, in request order, so unconstrained kinds
    // tie-break to the order the operator asked for.
    for id in requested {
        if nodes.contains_key(id) {
            continue;
        }
        let _ = catalog.lookup(id)?;
        let idx = graph.add_kind(id.clone());
        let _ = nodes.insert(id.clone(), idx);
        pending.push_back(id.clone());
    }

    // Walk the transitive dependency closure. Kinds discovered here are
    // graph nodes for cycle and unknown-dependency checking only; they do
    // not constrain the requested kinds beyond their own edges and the
    // wiring step still reports them as missing exports if a body requires
    // their output.
    while let Some(id) = pending.pop_front() {
        let kind = catalog.lookup(&id)?;
        let Some(&dependent) = nodes.get(&id) else {
            continue;
        };
        for dependency in kind.dependencies() {
            if !catalog.contains(&dependency) {
                return Err(StackplaneError::UnknownDependency {
                    declared_by: id.to_string(),
                    dependency: dependency.to_string(),
                });
            }
            let provider = if let Some(&idx) = nodes.get(&dependency) {
                idx
            } else {
                let idx = graph.add_kind(dependency.clone());
                let _ = nodes.insert(dependency.clone(), idx);
                pending.push_back(dependency.clone());
                idx
            };
            graph.add_dependency(dependent, provider);
        }
    }

    let requested_set: HashSet<&StackKindId> = requested.iter().collect();
    let order: Vec<StackKindId> = graph
        .instantiation_order()?
        .into_iter()
        .filter(|id| requested_set.contains(id))
        .collect();
    tracing::debug!(kinds = order.len(), "resolved instantiation order");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use stackplane_common::environment::EnvironmentDescriptor;
    use stackplane_common::types::ValueMap;

    use super::*;
    use crate::stack::StackBody;

    struct Static {
        deps: Vec<StackKindId>,
    }

    impl StackBody for Static {
        fn dependencies(&self) -> Vec<StackKindId> {
            self.deps.clone()
        }

        fn initialize(
            &self,
            _descriptor: &EnvironmentDescriptor,
            _inputs: &ValueMap,
        ) -> Result<ValueMap> {
            Ok(ValueMap::new())
        }
    }

    fn register(catalog: &mut StackCatalog, id: &str, deps: &[&str]) {
        catalog
            .register(
                id,
                Box::new(Static {
                    deps: deps.iter().map(|&d| StackKindId::from(d)).collect(),
                }),
            )
            .expect("register");
    }

    fn ids(names: &[&str]) -> Vec<StackKindId> {
        names.iter().map(|&n| StackKindId::from(n)).collect()
    }

    /// The five builtin kinds with their production dependency shape.
    fn deployment_catalog() -> StackCatalog {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "state-bucket", &[]);
        register(&mut catalog, "services", &["state-bucket"]);
        register(&mut catalog, "database", &["services"]);
        register(&mut catalog, "registry", &["services"]);
        register(&mut catalog, "compute", &["services", "registry"]);
        catalog
    }

    #[test]
    fn orders_dependencies_before_dependents() {
        let catalog = deployment_catalog();
        let order = resolve_order(
            &catalog,
            &ids(&["compute", "registry", "database", "services", "state-bucket"]),
        )
        .expect("should resolve");

        let pos = |name: &str| order.iter().position(|n| n.as_str() == name).expect(name);
        assert_eq!(pos("state-bucket"), 0);
        assert_eq!(pos("services"), 1);
        assert_eq!(pos("compute"), 4);
        assert!(pos("services") < pos("database"));
        assert!(pos("services") < pos("registry"));
        assert!(pos("registry") < pos("compute"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let catalog = deployment_catalog();
        let request = ids(&["database", "compute", "registry", "state-bucket", "services"]);
        let first = resolve_order(&catalog, &request).expect("first");
        let second = resolve_order(&catalog, &request).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn unconstrained_kinds_keep_request_order() {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "a", &[]);
        register(&mut catalog, "b", &[]);
        register(&mut catalog, "c", &[]);

        let order = resolve_order(&catalog, &ids(&["c", "a", "b"])).expect("should resolve");
        assert_eq!(order, ids(&["c", "a", "b"]));
    }

    #[test]
    fn duplicate_requests_collapse_to_first_occurrence() {
        let catalog = deployment_catalog();
        let order = resolve_order(
            &catalog,
            &ids(&["services", "state-bucket", "services", "state-bucket"]),
        )
        .expect("should resolve");
        assert_eq!(order, ids(&["state-bucket", "services"]));
    }

    #[test]
    fn request_may_be_a_subset_of_the_catalog() {
        let catalog = deployment_catalog();
        let order =
            resolve_order(&catalog, &ids(&["services", "state-bucket"])).expect("should resolve");
        assert_eq!(order, ids(&["state-bucket", "services"]));
    }

    #[test]
    fn unknown_requested_kind_is_not_found() {
        let catalog = deployment_catalog();
        let err = resolve_order(&catalog, &ids(&["ghost"])).expect_err("should fail");
        assert!(matches!(err, StackplaneError::NotFound { .. }), "got: {err}");
    }

    #[test]
    fn unknown_dependency_names_the_missing_identifier() {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "compute", &["vpc-network"]);

        let err = resolve_order(&catalog, &ids(&["compute"])).expect_err("should fail");
        match err {
            StackplaneError::UnknownDependency {
                declared_by,
                dependency,
            } => {
                assert_eq!(declared_by, "compute");
                assert_eq!(dependency, "vpc-network");
            }
            other => panic!("expected UnknownDependency, got: {other}"),
        }
    }

    #[test]
    fn cycle_names_both_participants() {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "a", &["b"]);
        register(&mut catalog, "b", &["a"]);

        for request in [ids(&["a", "b"]), ids(&["b", "a"])] {
            let err = resolve_order(&catalog, &request).expect_err("should fail");
            match err {
                StackplaneError::Cycle { members } => {
                    assert!(members.contains(&"a".to_string()), "got: {members:?}");
                    assert!(members.contains(&"b".to_string()), "got: {members:?}");
                }
                other => panic!("expected Cycle, got: {other}"),
            }
        }
    }

    #[test]
    fn dependency_outside_the_request_is_not_emitted() {
        let catalog = deployment_catalog();
        // services depends on state-bucket, which is not requested here: it
        // is validated as part of the closure but stays out of the order.
        let order = resolve_order(&catalog, &ids(&["database", "services"])).expect("resolve");
        assert_eq!(order, ids(&["services", "database"]));
    }

    #[test]
    fn cycle_is_detected_when_only_one_member_is_requested() {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "a", &["b"]);
        register(&mut catalog, "b", &["a"]);

        for request in [ids(&["a"]), ids(&["b"])] {
            let err = resolve_order(&catalog, &request).expect_err("should fail");
            match err {
                StackplaneError::Cycle { members } => {
                    assert!(members.contains(&"a".to_string()), "got: {members:?}");
                    assert!(members.contains(&"b".to_string()), "got: {members:?}");
                }
                other => panic!("expected Cycle, got: {other}"),
            }
        }
    }

    #[test]
    fn unknown_dependency_is_detected_through_the_closure() {
        let mut catalog = StackCatalog::new();
        register(&mut catalog, "a", &["b"]);
        register(&mut catalog, "b", &["ghost"]);

        let err = resolve_order(&catalog, &ids(&["a"])).expect_err("should fail");
        match err {
            StackplaneError::UnknownDependency {
                declared_by,
                dependency,
            } => {
                assert_eq!(declared_by, "b");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("expected UnknownDependency, got: {other}"),
        }
    }
}
