//! Profile Fixtures

use std::time::Duration;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, JPY, USD};
use serde::Deserialize;

use crate::{
    config::{
        EligibilityBasis, EligibilityRule, Objective, PlannerConfig, SearchTuning, TaxExclusion,
    },
    fixtures::FixtureError,
};

/// Profile Fixture
#[derive(Debug, Deserialize)]
pub struct ProfileFixture {
    /// Price of one item, tax included (e.g., "1800 JPY")
    pub unit_price: String,

    /// Tax rate (e.g., "10%" or "0.10")
    pub tax_rate: String,

    /// Point rate on tax-exclusive cash (e.g., "20%" or "0.20")
    pub point_rate: String,

    /// Eligibility threshold (e.g., "10000 JPY")
    pub threshold: String,

    /// Minimum cash an order must pay to earn points (e.g., "0 JPY")
    #[serde(default)]
    pub min_cash: Option<String>,

    /// Amount compared against the threshold
    #[serde(default)]
    pub basis: EligibilityBasis,

    /// Earned points rounding scheme
    #[serde(default)]
    pub tax_exclusion: TaxExclusion,

    /// Secondary objective
    #[serde(default)]
    pub objective: Objective,

    /// Optional search tuning overrides
    #[serde(default)]
    pub search: Option<SearchFixture>,
}

/// Search tuning overrides; anything omitted keeps its default.
#[derive(Debug, Default, Deserialize)]
pub struct SearchFixture {
    /// Largest order size always tried
    pub small_quantity_max: Option<usize>,

    /// Window around the eligibility-threshold quantity
    pub threshold_window: Option<usize>,

    /// Window below the remaining item count
    pub tail_window: Option<usize>,

    /// Wall-clock budget in milliseconds
    pub time_budget_ms: Option<u64>,
}

impl ProfileFixture {
    /// Build the planner configuration and the currency its amounts are expressed in.
    ///
    /// # Errors
    ///
    /// Returns an error if any price or rate is malformed, or if the amounts do not share a
    /// currency.
    pub fn planner_config(&self) -> Result<(PlannerConfig, &'static Currency), FixtureError> {
        let (unit_price, currency) = parse_price(&self.unit_price)?;
        let threshold = parse_price_in(&self.threshold, currency)?;

        let min_cash = self
            .min_cash
            .as_deref()
            .map(|min_cash| parse_price_in(min_cash, currency))
            .transpose()?
            .unwrap_or(0);

        let config = PlannerConfig {
            unit_price,
            tax_rate: parse_rate(&self.tax_rate)?,
            point_rate: parse_rate(&self.point_rate)?,
            eligibility: EligibilityRule {
                threshold,
                basis: self.basis,
                min_cash,
            },
            tax_exclusion: self.tax_exclusion,
            objective: self.objective,
        };

        Ok((config, currency))
    }

    /// Search tuning with this fixture's overrides applied.
    pub fn search_tuning(&self) -> SearchTuning {
        let defaults = SearchTuning::default();
        let Some(search) = &self.search else {
            return defaults;
        };

        SearchTuning {
            small_quantity_max: search
                .small_quantity_max
                .unwrap_or(defaults.small_quantity_max),
            threshold_window: search.threshold_window.unwrap_or(defaults.threshold_window),
            tail_window: search.tail_window.unwrap_or(defaults.tail_window),
            time_budget: search
                .time_budget_ms
                .map_or(defaults.time_budget, Duration::from_millis),
        }
    }
}

/// Parse price string (e.g., "1800 JPY" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount
/// is not a non-negative number representable in minor units, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "JPY" => JPY,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.round_dp(0).to_i64())
        .filter(|&value| value >= 0)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse a price that must be expressed in `currency`.
///
/// # Errors
///
/// Returns [`FixtureError::CurrencyMismatch`] if the price uses another currency, or any
/// error from [`parse_price`].
pub fn parse_price_in(s: &str, currency: &'static Currency) -> Result<i64, FixtureError> {
    let (minor_units, found) = parse_price(s)?;

    if found != currency {
        return Err(FixtureError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            found.iso_alpha_code.to_string(),
        ));
    }

    Ok(minor_units)
}

/// Parse rate string (e.g., "10%" or "0.10") into a fraction between 0 and 1
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or lies outside `[0, 1]`.
pub fn parse_rate(s: &str) -> Result<Decimal, FixtureError> {
    let trimmed = s.trim();

    let rate = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .ok()
            .and_then(|percent| percent.checked_div(Decimal::ONE_HUNDRED))
    } else {
        trimmed.parse::<Decimal>().ok()
    };

    rate.filter(|rate| (Decimal::ZERO..=Decimal::ONE).contains(rate))
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))
}
