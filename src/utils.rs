//! Utils

use clap::Parser;

use crate::config::{EligibilityBasis, Objective, TaxExclusion};

/// Arguments for the planning demo
#[derive(Debug, Parser)]
pub struct ExamplePlanArgs {
    /// Number of items to buy
    #[clap(short, long, default_value_t = 12)]
    pub n: usize,

    /// Profile to load from `fixtures/profiles`
    #[clap(short, long, default_value = "default")]
    pub profile: String,

    /// Points held before the first order
    #[clap(short, long, default_value_t = 0)]
    pub starting_points: i64,

    /// Override the profile's secondary objective
    #[clap(long, value_enum)]
    pub objective: Option<Objective>,

    /// Override the profile's eligibility basis
    #[clap(long, value_enum)]
    pub basis: Option<EligibilityBasis>,

    /// Override the profile's earned points rounding scheme
    #[clap(long, value_enum)]
    pub tax_exclusion: Option<TaxExclusion>,

    /// Override the profile's time budget, in milliseconds
    #[clap(short, long)]
    pub budget_ms: Option<u64>,

    /// Print the plan as YAML instead of a table
    #[clap(long)]
    pub yaml: bool,
}
