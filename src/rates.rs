//! Earning Rates
//!
//! Point and tax rates arrive as decimals. The hot path of the search only ever needs
//! integer floors of `cash × rate`, so the rates are converted once into exact integer
//! fractions and every earning computation afterwards is a single `i128` multiply/divide.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::PlannerConfig;

/// Common denominator the rates are scaled to; rates are rounded to six decimal places.
pub const RATE_SCALE: i64 = 1_000_000;

/// Exact integer form of a point rate and tax rate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningRates {
    /// Reduced numerator of `point_rate / (1 + tax_rate)`.
    num: i64,

    /// Reduced denominator of `point_rate / (1 + tax_rate)`.
    den: i64,

    /// `point_rate × RATE_SCALE`
    point_scaled: i64,

    /// `(1 + tax_rate) × RATE_SCALE`
    tax_inclusive_scaled: i64,
}

impl EarningRates {
    /// Normalize a point rate and tax rate.
    pub fn new(point_rate: Decimal, tax_rate: Decimal) -> Self {
        let point_scaled = scale_rate(point_rate);
        let tax_inclusive_scaled = RATE_SCALE.saturating_add(scale_rate(tax_rate));

        let divisor = gcd(point_scaled, tax_inclusive_scaled).max(1);

        Self {
            num: point_scaled / divisor,
            den: tax_inclusive_scaled / divisor,
            point_scaled,
            tax_inclusive_scaled,
        }
    }

    /// Normalize the rates held by a planner configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.point_rate, config.tax_rate)
    }

    /// The coprime pair `(num, den)` with `num / den = point_rate / (1 + tax_rate)`.
    pub fn ratio(&self) -> (i64, i64) {
        (self.num, self.den)
    }

    /// `floor(cash × num / den)`
    pub fn ratio_floor(&self, cash: i64) -> i64 {
        mul_div_floor(cash, self.num, self.den)
    }

    /// `floor(floor(cash / (1 + tax_rate)) × point_rate)`
    pub fn floor_then_multiply(&self, cash: i64) -> i64 {
        let tax_exclusive = mul_div_floor(cash, RATE_SCALE, self.tax_inclusive_scaled);

        mul_div_floor(tax_exclusive, self.point_scaled, RATE_SCALE)
    }
}

/// `floor(value × mul / div)` without intermediate overflow. `div` must be positive.
pub(crate) fn mul_div_floor(value: i64, mul: i64, div: i64) -> i64 {
    let product = i128::from(value) * i128::from(mul);
    let quotient = product.div_euclid(i128::from(div.max(1)));

    i64::try_from(quotient).unwrap_or(i64::MAX)
}

/// `ceil(value × mul / div)` without intermediate overflow. `div` must be positive.
pub(crate) fn mul_div_ceil(value: i64, mul: i64, div: i64) -> i64 {
    let div = i128::from(div.max(1));
    let product = i128::from(value) * i128::from(mul);
    let quotient = (product + div - 1).div_euclid(div);

    i64::try_from(quotient).unwrap_or(i64::MAX)
}

fn scale_rate(rate: Decimal) -> i64 {
    rate.checked_mul(Decimal::from(RATE_SCALE))
        .and_then(|scaled| scaled.round().to_i64())
        .unwrap_or(0)
        .max(0)
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }

    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates(point: i64, tax: i64) -> EarningRates {
        EarningRates::new(Decimal::new(point, 2), Decimal::new(tax, 2))
    }

    #[test]
    fn reduces_to_coprime_fraction() {
        assert_eq!(rates(20, 10).ratio(), (2, 11));
        assert_eq!(rates(1, 8).ratio(), (1, 108));
    }

    #[test]
    fn zero_point_rate_reduces_to_zero_over_one() {
        assert_eq!(rates(0, 10).ratio(), (0, 1));
        assert_eq!(rates(0, 10).ratio_floor(10_800), 0);
        assert_eq!(rates(0, 10).floor_then_multiply(10_800), 0);
    }

    #[test]
    fn floor_then_multiply_floors_twice() {
        // floor(10800 / 1.1) = 9818, floor(9818 × 0.2) = 1963
        assert_eq!(rates(20, 10).floor_then_multiply(10_800), 1_963);

        // floor(1100 / 1.1) = 1000 exactly
        assert_eq!(rates(20, 10).floor_then_multiply(1_100), 200);
    }

    #[test]
    fn ratio_floor_floors_once() {
        // floor(10800 × 2 / 11) = floor(1963.63..)
        assert_eq!(rates(20, 10).ratio_floor(10_800), 1_963);

        // 5 × 2 / 11 < 1
        assert_eq!(rates(20, 10).ratio_floor(5), 0);
    }

    #[test]
    fn rates_are_rounded_to_six_places() {
        let rates = EarningRates::new(Decimal::new(1_234_567_8, 8), Decimal::ZERO);

        // 0.12345678 rounds to 0.123457
        assert_eq!(rates.ratio(), (123_457, 1_000_000));
    }

    #[test]
    fn ceil_division_rounds_up() {
        assert_eq!(mul_div_ceil(10, 1, 3), 4);
        assert_eq!(mul_div_ceil(9, 1, 3), 3);
        assert_eq!(mul_div_floor(10, 1, 3), 3);
    }
}
