//! Order Economics
//!
//! Pure per-order arithmetic shared by candidate generation, the search itself and the
//! post-search simulation.

use crate::{
    config::{PlannerConfig, TaxExclusion},
    rates::EarningRates,
};

/// Per-order cost and earning rules for one planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEconomics {
    config: PlannerConfig,
    rates: EarningRates,
}

impl OrderEconomics {
    /// Build the economics for a configuration, normalizing its rates.
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            config: *config,
            rates: EarningRates::from_config(config),
        }
    }

    /// The configuration these economics were built from.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The normalized earning rates.
    pub fn rates(&self) -> &EarningRates {
        &self.rates
    }

    /// Price of a single item.
    pub fn unit_price(&self) -> i64 {
        self.config.unit_price
    }

    /// Total price of `quantity` items, or `None` if it does not fit in an `i64`.
    pub fn checked_order_total(&self, quantity: usize) -> Option<i64> {
        i64::try_from(quantity)
            .ok()
            .and_then(|quantity| quantity.checked_mul(self.config.unit_price))
    }

    /// Total price of `quantity` items, saturating at `i64::MAX`.
    pub fn order_total(&self, quantity: usize) -> i64 {
        self.checked_order_total(quantity).unwrap_or(i64::MAX)
    }

    /// Smallest order size whose total reaches the eligibility threshold.
    ///
    /// Returns `None` when items are free, since no order size changes the total.
    pub fn threshold_quantity(&self) -> Option<usize> {
        let unit_price = self.config.unit_price;

        if unit_price <= 0 {
            return None;
        }

        let threshold = self.config.eligibility.threshold.max(0);

        usize::try_from(threshold.div_euclid(unit_price) + i64::from(threshold % unit_price != 0))
            .ok()
    }

    /// Returns true if the order earns points.
    pub fn eligible(&self, order_total: i64, cash_paid: i64) -> bool {
        self.config.eligibility.is_met(order_total, cash_paid)
    }

    /// Points earned by paying `cash_paid` in cash towards an order of `order_total`.
    pub fn points_earned(&self, cash_paid: i64, order_total: i64) -> i64 {
        if !self.eligible(order_total, cash_paid) {
            return 0;
        }

        match self.config.tax_exclusion {
            TaxExclusion::RatioFloor => self.rates.ratio_floor(cash_paid),
            TaxExclusion::FloorThenMultiply => self.rates.floor_then_multiply(cash_paid),
        }
    }

    /// Points balance after placing the order, starting from `prior_balance`.
    pub fn balance_after(&self, prior_balance: i64, cash_paid: i64, order_total: i64) -> i64 {
        let points_used = order_total - cash_paid;

        prior_balance - points_used + self.points_earned(cash_paid, order_total)
    }
}
