//! Fixtures
//!
//! Planner profiles stored as YAML, so a loyalty programme can be described once and
//! planned against repeatedly.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    config::{PlannerConfig, SearchTuning},
    fixtures::profile::ProfileFixture,
};

pub mod profile;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between amounts
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// A named planner configuration loaded from YAML.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    config: PlannerConfig,
    tuning: SearchTuning,
    currency: &'static Currency,
}

impl Profile {
    /// Load the profile `name` from `./fixtures/profiles/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load the profile `name` from `<base_path>/profiles/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let file_path = base_path
            .into()
            .join("profiles")
            .join(format!("{name}.yml"));

        let mut profile = Self::from_file(&file_path)?;
        profile.name = name.to_string();

        Ok(profile)
    }

    /// Load a profile from a YAML file, naming it after the file stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_yaml(&name, &contents)
    }

    /// Parse a profile from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or holds invalid prices or rates.
    pub fn from_yaml(name: &str, yaml: &str) -> Result<Self, FixtureError> {
        let fixture: ProfileFixture = serde_norway::from_str(yaml)?;
        let (config, currency) = fixture.planner_config()?;

        Ok(Self {
            name: name.to_string(),
            config,
            tuning: fixture.search_tuning(),
            currency,
        })
    }

    /// Profile name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Planner configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Mutable planner configuration, for command-line overrides.
    pub fn config_mut(&mut self) -> &mut PlannerConfig {
        &mut self.config
    }

    /// Search tuning
    pub fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    /// Mutable search tuning, for command-line overrides.
    pub fn tuning_mut(&mut self) -> &mut SearchTuning {
        &mut self.tuning
    }

    /// Currency all amounts are expressed in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
