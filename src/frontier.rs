//! Pareto Frontier
//!
//! Holds the non-dominated `(balance, cost)` pairs of a search layer. Entries are kept
//! sorted by balance, and costs rise strictly with balance: any entry that is no richer
//! than another yet costs at least as much is dropped.

/// A retained `(balance, cost)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Points balance
    pub balance: i64,

    /// Cumulative cash cost
    pub cost: i64,
}

/// Non-dominated `(balance, cost)` pairs for one layer.
#[derive(Debug, Clone, Default)]
pub struct ParetoFrontier {
    entries: Vec<FrontierEntry>,
}

impl ParetoFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an entry at least as rich and at most as expensive already exists.
    pub fn dominated(&self, balance: i64, cost: i64) -> bool {
        // Costs rise with balance, so the first entry at or above `balance` is the
        // cheapest of all entries that are at least as rich.
        self.entries
            .get(self.lower_bound(balance))
            .is_some_and(|entry| entry.cost <= cost)
    }

    /// Insert `(balance, cost)`, or lower the cost already stored at `balance`.
    ///
    /// Returns false if the pair is dominated and was not retained. Otherwise every
    /// lower-balance entry that is now dominated is removed.
    pub fn insert(&mut self, balance: i64, cost: i64) -> bool {
        let idx = self.lower_bound(balance);

        match self.entries.get_mut(idx) {
            Some(entry) if entry.balance == balance => {
                if entry.cost <= cost {
                    return false;
                }

                entry.cost = cost;
            }
            Some(entry) if entry.cost <= cost => return false,
            _ => self.entries.insert(idx, FrontierEntry { balance, cost }),
        }

        // Poorer entries that cost as much or more are dominated by the new one. They
        // form a contiguous run directly to the left of `idx`.
        let keep = self
            .entries
            .get(..idx)
            .map_or(0, |left| left.partition_point(|entry| entry.cost < cost));

        self.entries.drain(keep..idx);

        true
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries in ascending balance order.
    pub fn iter(&self) -> impl Iterator<Item = &FrontierEntry> {
        self.entries.iter()
    }

    fn lower_bound(&self, balance: i64) -> usize {
        self.entries.partition_point(|entry| entry.balance < balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(frontier: &ParetoFrontier) -> Vec<(i64, i64)> {
        frontier
            .iter()
            .map(|entry| (entry.balance, entry.cost))
            .collect()
    }

    fn assert_strictly_increasing(frontier: &ParetoFrontier) {
        let entries = pairs(frontier);

        for window in entries.windows(2) {
            if let [(p1, c1), (p2, c2)] = window {
                assert!(p1 < p2, "balances must increase: {entries:?}");
                assert!(c1 < c2, "costs must increase: {entries:?}");
            }
        }
    }

    #[test]
    fn empty_frontier_dominates_nothing() {
        let frontier = ParetoFrontier::new();

        assert!(!frontier.dominated(0, 0));
        assert!(frontier.is_empty());
    }

    #[test]
    fn richer_and_cheaper_entry_dominates() {
        let mut frontier = ParetoFrontier::new();

        assert!(frontier.insert(100, 50));

        assert!(frontier.dominated(100, 50));
        assert!(frontier.dominated(80, 60));
        assert!(!frontier.dominated(120, 60));
        assert!(!frontier.dominated(80, 40));
    }

    #[test]
    fn insert_rejects_dominated_pairs() {
        let mut frontier = ParetoFrontier::new();

        assert!(frontier.insert(100, 50));
        assert!(!frontier.insert(100, 50));
        assert!(!frontier.insert(90, 70));

        assert_eq!(pairs(&frontier), vec![(100, 50)]);
    }

    #[test]
    fn insert_improves_existing_balance() {
        let mut frontier = ParetoFrontier::new();

        frontier.insert(50, 10);
        frontier.insert(100, 50);

        assert!(frontier.insert(100, 30));
        assert_eq!(pairs(&frontier), vec![(50, 10), (100, 30)]);
    }

    #[test]
    fn insert_removes_newly_dominated_poorer_entries() {
        let mut frontier = ParetoFrontier::new();

        frontier.insert(10, 5);
        frontier.insert(20, 10);
        frontier.insert(30, 20);

        assert!(frontier.insert(40, 10));
        assert_eq!(pairs(&frontier), vec![(10, 5), (40, 10)]);
    }

    #[test]
    fn equal_costs_never_survive() {
        let mut frontier = ParetoFrontier::new();

        frontier.insert(10, 7);
        frontier.insert(20, 7);

        assert_eq!(pairs(&frontier), vec![(20, 7)]);
    }

    #[test]
    fn invariant_holds_under_mixed_operations() {
        let mut frontier = ParetoFrontier::new();
        let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

        for _ in 0..2_000 {
            // xorshift keeps the sequence deterministic without a rand dependency
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;

            let balance = i64::try_from(seed % 500).unwrap_or_default();
            let cost = i64::try_from((seed >> 20) % 1_000).unwrap_or_default();

            let was_dominated = frontier.dominated(balance, cost);
            let inserted = frontier.insert(balance, cost);

            assert_eq!(was_dominated, !inserted, "dominated and insert must agree");
            assert_strictly_increasing(&frontier);
        }

        assert!(!frontier.is_empty());
    }
}
