//! Purchase Plan Example
//!
//! Plans a purchase of identical items against a loyalty profile and prints one row per
//! order.
//!
//! Use `-n` to set the number of items
//! Use `-p` to load a profile by name from `fixtures/profiles`
//! Use `-s` to start with a points balance
//! Use `--yaml` to print the plan as YAML
//!
//! Set `RUST_LOG=pointsplit=debug` to follow the search.

use std::{io, io::Write, time::Duration};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;

use pointsplit::{
    fixtures::Profile,
    plan::PlanRequest,
    receipt::PlanReceipt,
    solvers::{Solver, layered::LayeredSolver},
    utils::ExamplePlanArgs,
};

/// Purchase Plan Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExamplePlanArgs::parse();

    let mut profile = Profile::from_set(&args.profile)?;

    if let Some(objective) = args.objective {
        profile.config_mut().objective = objective;
    }

    if let Some(basis) = args.basis {
        profile.config_mut().eligibility.basis = basis;
    }

    if let Some(tax_exclusion) = args.tax_exclusion {
        profile.config_mut().tax_exclusion = tax_exclusion;
    }

    if let Some(budget_ms) = args.budget_ms {
        profile.tuning_mut().time_budget = Duration::from_millis(budget_ms);
    }

    let request = PlanRequest::new(args.n).with_starting_points(args.starting_points);
    let solver = LayeredSolver::new(*profile.tuning());

    let result = solver.solve(&request, profile.config())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.yaml {
        write!(handle, "{}", serde_norway::to_string(&result)?)?;

        return Ok(());
    }

    PlanReceipt::new(&result, profile.currency()).write_to(&mut handle)?;

    let elapsed = result.meta.elapsed;

    writeln!(
        handle,
        " {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
