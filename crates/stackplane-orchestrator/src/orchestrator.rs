//! The deployment driver: resolves the instantiation order and wires
//! dependency exports into dependent inputs, one environment at a time.
//!
//! Environments are processed sequentially and independently. Each pass owns
//! its export table; a failure aborts that pass only and the orchestrator
//! moves on to the next environment.

use std::collections::BTreeMap;

use stackplane_catalog::catalog::StackCatalog;
use stackplane_catalog::resolver;
use stackplane_catalog::stack::StackKind;
use stackplane_common::environment::{self, EnvironmentDescriptor};
use stackplane_common::error::{Result, StackplaneError};
use stackplane_common::types::{StackKindId, ValueMap};

use crate::instance::StackInstance;
use crate::report::{DeploymentReport, EnvironmentOutcome};

/// Drives multi-stack deployment planning against a read-only catalog.
#[derive(Debug)]
pub struct Orchestrator<'a> {
    catalog: &'a StackCatalog,
}

impl<'a> Orchestrator<'a> {
    /// Creates an orchestrator over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a StackCatalog) -> Self {
        Self { catalog }
    }

    /// Plans every environment in sequence and reports one outcome each.
    ///
    /// The instantiation order is resolved once up front because the
    /// dependency graph is shared across environments. Repeated runs with
    /// the same catalog, request, and descriptors produce identical orders
    /// and wiring.
    ///
    /// # Errors
    ///
    /// Graph-structural failures are fatal to the whole run: `Config` if a
    /// descriptor is invalid or environment names collide, `NotFound`,
    /// `UnknownDependency`, or `Cycle` if the request cannot be resolved
    /// against the catalog. Per-environment failures (`MissingExport`,
    /// `StackInstantiation`) are recorded in the report instead.
    pub fn deploy(
        &self,
        environments: &[EnvironmentDescriptor],
        requested: &[StackKindId],
    ) -> Result<DeploymentReport> {
        environment::ensure_unique_names(environments)?;
        for descriptor in environments {
            descriptor.validate()?;
        }

        let order = resolver::resolve_order(self.catalog, requested)?;
        tracing::info!(
            stacks = order.len(),
            environments = environments.len(),
            "planning deployment"
        );

        let outcomes = environments
            .iter()
            .map(|descriptor| self.deploy_environment(descriptor, &order))
            .collect();
        Ok(DeploymentReport {
            environments: outcomes,
        })
    }

    fn deploy_environment(
        &self,
        descriptor: &EnvironmentDescriptor,
        order: &[StackKindId],
    ) -> EnvironmentOutcome {
        match self.instantiate_all(descriptor, order) {
            Ok(instances) => {
                tracing::info!(
                    environment = %descriptor.name,
                    stacks = instances.len(),
                    "environment pass complete"
                );
                EnvironmentOutcome::Deployed {
                    name: descriptor.name.clone(),
                    instances,
                }
            }
            Err(error) => {
                tracing::warn!(
                    environment = %descriptor.name,
                    %error,
                    "environment pass aborted"
                );
                EnvironmentOutcome::Failed {
                    name: descriptor.name.clone(),
                    error,
                }
            }
        }
    }

    /// Instantiates every kind in `order`, threading exports forward through
    /// this environment's export table.
    fn instantiate_all(
        &self,
        descriptor: &EnvironmentDescriptor,
        order: &[StackKindId],
    ) -> Result<Vec<StackInstance>> {
        let mut instances = Vec::with_capacity(order.len());
        let mut exports: BTreeMap<StackKindId, ValueMap> = BTreeMap::new();

        for id in order {
            let kind = self.catalog.lookup(id)?;
            let inputs = gather_inputs(descriptor, kind, &exports)?;
            tracing::debug!(
                environment = %descriptor.name,
                kind = %id,
                inputs = inputs.len(),
                "instantiating stack"
            );

            let produced = kind.body().initialize(descriptor, &inputs).map_err(|e| {
                StackplaneError::StackInstantiation {
                    environment: descriptor.name.clone(),
                    kind: id.to_string(),
                    message: e.to_string(),
                }
            })?;

            let _ = exports.insert(id.clone(), produced.clone());
            instances.push(StackInstance {
                environment: descriptor.name.clone(),
                kind: id.clone(),
                inputs,
                exports: produced,
            });
        }

        Ok(instances)
    }
}

/// Assembles one stack's input map: descriptor defaults first, then the full
/// export mapping of every declared dependency already instantiated in this
/// environment, with every declared requirement checked against the
/// dependency that owns it.
fn gather_inputs(
    descriptor: &EnvironmentDescriptor,
    kind: &StackKind,
    exports: &BTreeMap<StackKindId, ValueMap>,
) -> Result<ValueMap> {
    let mut inputs = descriptor.default_inputs();

    for dependency in kind.dependencies() {
        if let Some(table) = exports.get(&dependency) {
            for (key, value) in table {
                let _ = inputs.insert(key.clone(), value.clone());
            }
        }
    }

    for requirement in kind.body().required_inputs() {
        let satisfied = exports
            .get(&requirement.from)
            .is_some_and(|table| table.contains_key(&requirement.key));
        if !satisfied {
            return Err(StackplaneError::MissingExport {
                environment: descriptor.name.clone(),
                dependency: requirement.from.to_string(),
                key: requirement.key,
            });
        }
    }

    Ok(inputs)
}
