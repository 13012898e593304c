//! Search State
//!
//! One map per layer (items bought so far) from points balance to the cheapest known
//! way of reaching it. Back-pointers only ever refer to strictly earlier layers, so the
//! layers form a DAG that can be walked backwards by index.

use rustc_hash::FxHashMap;

use crate::frontier::ParetoFrontier;

/// A single order moving the search from a parent state to a later layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Layer of the parent state.
    pub parent_layer: usize,

    /// Points balance of the parent state.
    pub parent_balance: i64,

    /// Items bought by the order.
    pub quantity: usize,

    /// Cash paid for the order.
    pub cash_paid: i64,

    /// Points redeemed against the order.
    pub points_used: i64,

    /// Price of the order before points.
    pub order_total: i64,
}

/// Cheapest known cost of a `(layer, balance)` state and how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEntry {
    /// Cumulative cash paid to reach the state.
    pub cost: i64,

    /// Orders on the back-pointer chain from the root.
    pub orders: usize,

    /// The transition that achieved `cost`; `None` only for the root state.
    pub parent: Option<Transition>,
}

/// Snapshot of one state, taken before its layer is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerState {
    /// Points balance
    pub balance: i64,

    /// Cumulative cash cost
    pub cost: i64,

    /// Orders placed so far
    pub orders: usize,
}

/// States of one layer, keyed by points balance.
pub type Layer = FxHashMap<i64, LayerEntry>;

/// Layers and their frontiers for a single planning call.
#[derive(Debug)]
pub struct SearchState {
    layers: Vec<Layer>,
    frontiers: Vec<ParetoFrontier>,
}

impl SearchState {
    /// Create the layers `0..=items`, seeding layer 0 with `start_balance` at zero cost.
    pub fn new(items: usize, start_balance: i64) -> Self {
        let mut layers = vec![Layer::default(); items + 1];
        let mut frontiers = vec![ParetoFrontier::new(); items + 1];

        if let Some(root) = layers.first_mut() {
            root.insert(
                start_balance,
                LayerEntry {
                    cost: 0,
                    orders: 0,
                    parent: None,
                },
            );
        }

        if let Some(root) = frontiers.first_mut() {
            root.insert(start_balance, 0);
        }

        Self { layers, frontiers }
    }

    /// All layers, indexed by items bought.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of retained frontier entries for a layer.
    pub fn frontier_len(&self, layer: usize) -> usize {
        self.frontiers.get(layer).map_or(0, ParetoFrontier::len)
    }

    /// States of a layer in ascending balance order.
    ///
    /// Expanding a layer writes to later layers, so the search iterates over this
    /// snapshot rather than the map itself. Sorting keeps tie-breaks independent of
    /// hash iteration order.
    pub fn states(&self, layer: usize) -> Vec<LayerState> {
        let mut states: Vec<LayerState> = self
            .layers
            .get(layer)
            .map(|states| {
                states
                    .iter()
                    .map(|(&balance, entry)| LayerState {
                        balance,
                        cost: entry.cost,
                        orders: entry.orders,
                    })
                    .collect()
            })
            .unwrap_or_default();

        states.sort_unstable_by_key(|state| state.balance);

        states
    }

    /// Offer a state to `layer`, reached by a chain of `orders` orders.
    ///
    /// The state is kept if its balance is new, if it is strictly cheaper than the
    /// recorded one, or if it costs the same through a shorter chain. With `prune`, new
    /// balances and cheaper costs are checked against the layer's frontier first; an
    /// equal-cost replacement leaves the frontier as it is. Returns true if the state
    /// was recorded.
    pub fn relax(
        &mut self,
        layer: usize,
        balance: i64,
        cost: i64,
        orders: usize,
        transition: Transition,
        prune: bool,
    ) -> bool {
        let entry = LayerEntry {
            cost,
            orders,
            parent: Some(transition),
        };

        let Some(states) = self.layers.get_mut(layer) else {
            return false;
        };

        if let Some(existing) = states.get_mut(&balance) {
            if cost > existing.cost || (cost == existing.cost && orders >= existing.orders) {
                return false;
            }

            if cost == existing.cost {
                *existing = entry;
                return true;
            }
        }

        if prune {
            let Some(frontier) = self.frontiers.get_mut(layer) else {
                return false;
            };

            if frontier.dominated(balance, cost) || !frontier.insert(balance, cost) {
                return false;
            }
        }

        states.insert(balance, entry);

        true
    }
}
