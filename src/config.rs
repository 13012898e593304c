//! Planner Configuration

use std::time::Duration;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which amount of an order is compared against the eligibility threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum EligibilityBasis {
    /// The order total before any points are redeemed.
    #[default]
    #[serde(rename = "order_total")]
    OrderTotal,

    /// The cash actually paid for the order.
    #[serde(rename = "cash_paid")]
    CashPaid,
}

/// How earned points are derived from the cash paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum TaxExclusion {
    /// `floor(cash × point_rate / (1 + tax_rate))` using the reduced integer fraction.
    #[serde(rename = "ratio_floor")]
    RatioFloor,

    /// `floor(floor(cash / (1 + tax_rate)) × point_rate)`.
    #[default]
    #[serde(rename = "taxex_floor_then_rate")]
    FloorThenMultiply,
}

/// Tie-break applied among plans with the same total cash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
pub enum Objective {
    /// Fewest orders among the cheapest plans.
    #[default]
    #[serde(rename = "min_cash_then_min_orders")]
    MinOrders,

    /// Smallest leftover balance among the cheapest plans.
    #[serde(rename = "min_cash_then_min_leftover")]
    MinLeftover,
}

/// Threshold test deciding whether an order earns points at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityRule {
    /// Minimum amount (per `basis`) an order must reach.
    pub threshold: i64,

    /// Amount compared against `threshold`.
    pub basis: EligibilityBasis,

    /// Additional minimum on the cash paid, regardless of basis.
    pub min_cash: i64,
}

impl EligibilityRule {
    /// Returns true if an order with the given total and cash payment earns points.
    pub fn is_met(&self, order_total: i64, cash_paid: i64) -> bool {
        let amount = match self.basis {
            EligibilityBasis::OrderTotal => order_total,
            EligibilityBasis::CashPaid => cash_paid,
        };

        amount >= self.threshold && cash_paid >= self.min_cash
    }
}

impl Default for EligibilityRule {
    fn default() -> Self {
        Self {
            threshold: 10_000,
            basis: EligibilityBasis::OrderTotal,
            min_cash: 0,
        }
    }
}

/// Loyalty programme and pricing parameters for a single planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Price of one item in minor currency units, tax included.
    pub unit_price: i64,

    /// Tax rate as a fraction (e.g. `0.10`).
    pub tax_rate: Decimal,

    /// Points earned per unit of tax-exclusive cash, as a fraction (e.g. `0.20`).
    pub point_rate: Decimal,

    /// When an order is eligible to earn points.
    pub eligibility: EligibilityRule,

    /// Rounding scheme for earned points.
    pub tax_exclusion: TaxExclusion,

    /// Secondary objective.
    pub objective: Objective,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            unit_price: 1_800,
            tax_rate: Decimal::new(10, 2),
            point_rate: Decimal::new(20, 2),
            eligibility: EligibilityRule::default(),
            tax_exclusion: TaxExclusion::FloorThenMultiply,
            objective: Objective::MinOrders,
        }
    }
}

/// Knobs bounding the forward search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTuning {
    /// Every order size from 1 up to this value is a candidate.
    pub small_quantity_max: usize,

    /// Sizes within this distance of the eligibility-threshold quantity are candidates.
    pub threshold_window: usize,

    /// Sizes within this distance below the remaining item count are candidates.
    pub tail_window: usize,

    /// Wall-clock budget, checked between layers.
    pub time_budget: Duration,
}

impl SearchTuning {
    /// Returns a copy with the given time budget.
    #[must_use]
    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            small_quantity_max: 12,
            threshold_window: 4,
            tail_window: 12,
            time_budget: Duration::from_secs(8),
        }
    }
}
