//! Cash Candidates
//!
//! For a fixed order, the balance left after the order is monotonic non-decreasing in
//! the cash paid. The only cash amounts worth exploring are therefore the interval
//! endpoints and the neighbourhoods where the resulting balance first reaches a useful
//! target: enough points to pay for everything that remains, or everything but one item.

use smallvec::SmallVec;

use crate::{
    config::TaxExclusion,
    economics::OrderEconomics,
    rates::mul_div_ceil,
};

/// Half-width of the cash bracket searched around the closed-form boundary estimate.
const ESTIMATE_BRACKET: i64 = 16;

/// Candidate cash payments, ascending and deduplicated.
pub type CashCandidates = SmallVec<[i64; 8]>;

/// Cash payments worth trying for an order of `order_total` with `available_points`.
///
/// Every returned value lies within `[max(0, order_total - available_points), order_total]`.
pub fn cash_candidates(
    available_points: i64,
    order_total: i64,
    remaining_total: i64,
    economics: &OrderEconomics,
) -> CashCandidates {
    let range = CashRange {
        min: (order_total - available_points.clamp(0, order_total)).max(0),
        max: order_total,
    };

    let mut candidates = CashCandidates::new();

    range.push(&mut candidates, range.min);
    range.push(&mut candidates, range.max);

    let targets = [
        remaining_total,
        (remaining_total - economics.unit_price()).max(0),
    ];

    for target in targets {
        let search = BoundarySearch {
            available_points,
            order_total,
            target,
            range,
            economics,
        };

        if search.reaches(range.min) {
            range.push(&mut candidates, range.min + 1);
            continue;
        }

        if !search.reaches(range.max) {
            continue;
        }

        let boundary = search.find();

        range.push(&mut candidates, boundary - 1);
        range.push(&mut candidates, boundary);
        range.push(&mut candidates, boundary + 1);
    }

    candidates.sort_unstable();

    candidates
}

#[derive(Debug, Clone, Copy)]
struct CashRange {
    min: i64,
    max: i64,
}

impl CashRange {
    fn push(self, candidates: &mut CashCandidates, cash: i64) {
        if (self.min..=self.max).contains(&cash) && !candidates.contains(&cash) {
            candidates.push(cash);
        }
    }
}

/// Locates the smallest cash payment whose resulting balance reaches `target`.
///
/// Callers guarantee that `range.min` falls short of the target and `range.max` reaches
/// it, so the boundary lies in `(range.min, range.max]`.
struct BoundarySearch<'a> {
    available_points: i64,
    order_total: i64,
    target: i64,
    range: CashRange,
    economics: &'a OrderEconomics,
}

impl BoundarySearch<'_> {
    fn reaches(&self, cash: i64) -> bool {
        self.economics
            .balance_after(self.available_points, cash, self.order_total)
            >= self.target
    }

    fn is_boundary(&self, cash: i64) -> bool {
        self.reaches(cash) && (cash == self.range.min || !self.reaches(cash - 1))
    }

    fn find(&self) -> i64 {
        match self.economics.config().tax_exclusion {
            TaxExclusion::RatioFloor => self.estimate_and_correct(),
            TaxExclusion::FloorThenMultiply => self.bracketed_bisect(),
        }
    }

    /// Ignoring the floor, `balance = available - (total - cash) + cash × num / den`, so the
    /// target is first reached near `cash = (target - available + total) × den / (den + num)`.
    fn estimate(&self) -> i64 {
        let (num, den) = self.economics.rates().ratio();
        let needed = self.target - self.available_points + self.order_total;

        mul_div_ceil(needed, den, den + num).clamp(self.range.min, self.range.max)
    }

    /// Closed-form estimate followed by a bounded walk to the exact boundary.
    ///
    /// The floor moves the true boundary by at most `den` steps.
    fn estimate_and_correct(&self) -> i64 {
        let (_, den) = self.economics.rates().ratio();

        let mut cash = self.estimate();
        let mut steps = 0;

        while cash > self.range.min && steps < den && self.reaches(cash - 1) {
            cash -= 1;
            steps += 1;
        }

        while cash < self.range.max && steps < den && !self.reaches(cash) {
            cash += 1;
            steps += 1;
        }

        if self.is_boundary(cash) {
            cash
        } else {
            // An ineligible stretch (cash-paid basis) can put the boundary far from the
            // estimate.
            self.bisect(self.range.min, self.range.max)
        }
    }

    /// Binary search, first within a narrow bracket around the closed-form estimate.
    ///
    /// Flooring before multiplying loses at most a couple of points against the exact
    /// ratio, so the boundary normally sits just above the estimate.
    fn bracketed_bisect(&self) -> i64 {
        let estimate = self.estimate();
        let lo = estimate.saturating_sub(ESTIMATE_BRACKET).max(self.range.min);
        let hi = estimate.saturating_add(ESTIMATE_BRACKET).min(self.range.max);

        if self.reaches(hi) && !self.reaches(lo) {
            self.bisect(lo, hi)
        } else {
            self.bisect(self.range.min, self.range.max)
        }
    }

    fn bisect(&self, mut lo: i64, mut hi: i64) -> i64 {
        while lo < hi {
            let mid = lo + (hi - lo) / 2;

            if self.reaches(mid) {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }

        lo
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{EligibilityBasis, EligibilityRule, PlannerConfig};

    use super::*;

    fn economics(tax_exclusion: TaxExclusion, basis: EligibilityBasis) -> OrderEconomics {
        OrderEconomics::new(&PlannerConfig {
            tax_exclusion,
            eligibility: EligibilityRule {
                basis,
                ..EligibilityRule::default()
            },
            ..PlannerConfig::default()
        })
    }

    fn smallest_reaching(
        economics: &OrderEconomics,
        available: i64,
        total: i64,
        target: i64,
    ) -> Option<i64> {
        let min = (total - available.min(total)).max(0);

        (min..=total).find(|&cash| economics.balance_after(available, cash, total) >= target)
    }

    #[test]
    fn no_points_means_only_full_cash() {
        let economics = economics(TaxExclusion::FloorThenMultiply, EligibilityBasis::OrderTotal);

        let candidates = cash_candidates(0, 10_800, 3_600, &economics);

        assert_eq!(candidates.as_slice(), &[10_800]);
    }

    #[test]
    fn candidates_stay_within_payable_range() {
        for method in [TaxExclusion::RatioFloor, TaxExclusion::FloorThenMultiply] {
            for basis in [EligibilityBasis::OrderTotal, EligibilityBasis::CashPaid] {
                let economics = economics(method, basis);

                for available in [0, 500, 1_963, 5_000, 20_000] {
                    let candidates = cash_candidates(available, 10_800, 7_200, &economics);

                    assert!(
                        candidates.windows(2).all(|pair| matches!(pair, [a, b] if a < b)),
                        "candidates must be strictly ascending: {candidates:?}"
                    );
                    assert!(
                        candidates
                            .iter()
                            .all(|&cash| (10_800 - available.min(10_800)..=10_800).contains(&cash)),
                        "candidates out of range: {candidates:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn boundary_matches_exhaustive_scan() {
        for method in [TaxExclusion::RatioFloor, TaxExclusion::FloorThenMultiply] {
            for basis in [EligibilityBasis::OrderTotal, EligibilityBasis::CashPaid] {
                let economics = economics(method, basis);

                for (available, total, remaining) in [
                    (5_000, 10_800, 3_600),
                    (9_000, 10_800, 7_200),
                    (3_000, 12_600, 5_400),
                    (12_000, 10_800, 1_800),
                ] {
                    let candidates = cash_candidates(available, total, remaining, &economics);

                    for target in [remaining, (remaining - 1_800).max(0)] {
                        let Some(boundary) =
                            smallest_reaching(&economics, available, total, target)
                        else {
                            continue;
                        };

                        assert!(
                            candidates.contains(&boundary),
                            "{method:?}/{basis:?}: boundary {boundary} for target {target} missing from {candidates:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn reached_target_at_minimum_adds_next_step() {
        let economics = economics(TaxExclusion::FloorThenMultiply, EligibilityBasis::OrderTotal);

        // 20000 points cover the whole order; paying nothing still leaves 9200 >= 3600.
        let candidates = cash_candidates(20_000, 10_800, 3_600, &economics);

        assert_eq!(candidates.as_slice(), &[0, 1, 10_800]);
    }

    #[test]
    fn bracketed_search_agrees_with_full_range() {
        for basis in [EligibilityBasis::OrderTotal, EligibilityBasis::CashPaid] {
            let economics = economics(TaxExclusion::FloorThenMultiply, basis);
            let total = 10_800;

            for available in (0..=total).step_by(373) {
                let range = CashRange {
                    min: total - available,
                    max: total,
                };

                for target in [1_800, 5_400, 9_000] {
                    let search = BoundarySearch {
                        available_points: available,
                        order_total: total,
                        target,
                        range,
                        economics: &economics,
                    };

                    if search.reaches(range.min) || !search.reaches(range.max) {
                        continue;
                    }

                    assert_eq!(
                        search.bracketed_bisect(),
                        search.bisect(range.min, range.max),
                        "{basis:?}: available {available}, target {target}"
                    );
                }
            }
        }
    }
}
