//! Plans the builtin GCP stacks for a dev and a prod environment and prints
//! the ordered, fully wired deployment plan.
//!
//! Run with `cargo run --example plan` (set `RUST_LOG=debug` for the
//! per-stack wiring trace).

use stackplane_common::constants;
use stackplane_common::environment::EnvironmentDescriptor;
use stackplane_common::types::StackKindId;
use stackplane_orchestrator::{EnvironmentOutcome, Orchestrator};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let environments = vec![
        EnvironmentDescriptor {
            name: "dev".into(),
            is_prod: false,
            project_id: "acme-dev".into(),
            project_number: 218_289_013_170,
            project_name: "acme-dev".into(),
            region: constants::DEFAULT_REGION.into(),
            zone: constants::DEFAULT_ZONE.into(),
            location: constants::DEFAULT_LOCATION.into(),
        },
        EnvironmentDescriptor {
            name: "prod".into(),
            is_prod: true,
            project_id: "acme-prod".into(),
            project_number: 218_289_013_171,
            project_name: "acme-prod".into(),
            region: constants::DEFAULT_REGION.into(),
            zone: constants::DEFAULT_ZONE.into(),
            location: constants::DEFAULT_LOCATION.into(),
        },
    ];

    let catalog = stackplane_gcp::builtin_catalog()?;
    let requested: Vec<StackKindId> = catalog.all().cloned().collect();
    let report = Orchestrator::new(&catalog).deploy(&environments, &requested)?;

    for outcome in &report.environments {
        println!("Deployment plan for environment: {}", outcome.name());
        println!("{}", "=".repeat(40));
        match outcome {
            EnvironmentOutcome::Deployed { instances, .. } => {
                for instance in instances {
                    println!("  + {}", instance.kind);
                    for (key, value) in &instance.exports {
                        println!("      {key} = {value}");
                    }
                }
            }
            EnvironmentOutcome::Failed { error, .. } => {
                println!("  ! pass aborted: {error}");
            }
        }
        println!();
    }

    Ok(())
}
