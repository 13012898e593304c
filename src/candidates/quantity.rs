//! Quantity Candidates

use smallvec::SmallVec;

use crate::config::SearchTuning;

/// Candidate order sizes, ascending and deduplicated.
pub type QuantityCandidates = SmallVec<[usize; 64]>;

/// Order sizes worth trying when `remaining_items` are still to be bought.
///
/// Optimal plans cluster around small orders, orders just reaching the eligibility
/// threshold, and orders that finish (or nearly finish) the plan, so only those
/// neighbourhoods are produced.
pub fn quantity_candidates(
    remaining_items: usize,
    threshold_quantity: Option<usize>,
    tuning: &SearchTuning,
) -> QuantityCandidates {
    let mut candidates = QuantityCandidates::new();

    if remaining_items == 0 {
        return candidates;
    }

    candidates.extend(1..=remaining_items.min(tuning.small_quantity_max));

    if let Some(threshold_quantity) = threshold_quantity {
        let low = threshold_quantity
            .saturating_sub(tuning.threshold_window)
            .max(1);
        let high = threshold_quantity
            .saturating_add(tuning.threshold_window)
            .min(remaining_items);

        candidates.extend(low..=high);
    }

    let tail = tuning.tail_window.min(remaining_items - 1);

    candidates.extend((0..=tail).map(|k| remaining_items - k));

    candidates.sort_unstable();
    candidates.dedup();

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> SearchTuning {
        SearchTuning {
            small_quantity_max: 3,
            threshold_window: 1,
            tail_window: 2,
            ..SearchTuning::default()
        }
    }

    #[test]
    fn nothing_remaining_yields_no_candidates() {
        assert!(quantity_candidates(0, Some(6), &tuning()).is_empty());
    }

    #[test]
    fn combines_small_threshold_and_tail_windows() {
        let candidates = quantity_candidates(50, Some(10), &tuning());

        assert_eq!(candidates.as_slice(), &[1, 2, 3, 9, 10, 11, 48, 49, 50]);
    }

    #[test]
    fn windows_overlap_without_duplicates() {
        let candidates = quantity_candidates(5, Some(6), &tuning());

        assert_eq!(candidates.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn single_item_remaining() {
        let candidates = quantity_candidates(1, Some(6), &tuning());

        assert_eq!(candidates.as_slice(), &[1]);
    }

    #[test]
    fn threshold_window_is_skipped_for_free_items() {
        let candidates = quantity_candidates(50, None, &tuning());

        assert_eq!(candidates.as_slice(), &[1, 2, 3, 48, 49, 50]);
    }

    #[test]
    fn default_tuning_always_offers_remaining_items() {
        let candidates = quantity_candidates(500, Some(6), &SearchTuning::default());

        assert_eq!(candidates.last(), Some(&500));
        assert_eq!(candidates.first(), Some(&1));
        assert!(candidates.contains(&488), "tail window reaches remaining - 12");
        assert!(!candidates.contains(&487), "tail window stops at remaining - 12");
    }

    #[test]
    fn default_tuning_fits_inline() {
        // Small sizes, threshold window and tail window never overlap here.
        let candidates = quantity_candidates(500, Some(100), &SearchTuning::default());

        assert_eq!(candidates.len(), 12 + 9 + 13);
        assert!(!candidates.spilled(), "default candidates should stay on the stack");
    }
}
