//! Layered Forward Search
//!
//! Dynamic program over "items bought so far". Layer `i` holds every points balance
//! reachable after buying `i` items together with the cheapest cash cost of getting
//! there. Layers are expanded in increasing order; each expansion tries the candidate
//! order sizes and cash payments from [`crate::candidates`] and records improved states
//! in later layers. Intermediate layers are pruned through their Pareto frontier, the
//! final layer is not, since the secondary objective compares every cheapest terminal
//! balance. A state reached again at the same cost keeps the chain with fewer orders.

use std::time::Instant;

use tracing::{debug, debug_span, trace, warn};

use crate::{
    candidates::{cash_candidates, quantity_candidates},
    config::{PlannerConfig, SearchTuning},
    consolidation::consolidate,
    economics::OrderEconomics,
    plan::{OrderStep, PlanMeta, PlanRequest, PlanResult, simulate_orders},
    solvers::{
        PlanError, Solver,
        layered::{
            observer::{NoopObserver, PlanObserver},
            selection::{reconstruct, select_terminal},
            state::{LayerState, SearchState, Transition},
        },
    },
};

pub mod observer;
pub mod selection;
pub mod state;

/// Solver using a layered dynamic program with Pareto pruning
#[derive(Debug, Clone, Default)]
pub struct LayeredSolver {
    tuning: SearchTuning,
}

impl Solver for LayeredSolver {
    fn solve(
        &self,
        request: &PlanRequest,
        config: &PlannerConfig,
    ) -> Result<PlanResult, PlanError> {
        self.solve_with_observer(request, config, &mut NoopObserver)
    }
}

impl LayeredSolver {
    /// Create a solver with the given search tuning.
    pub fn new(tuning: SearchTuning) -> Self {
        Self { tuning }
    }

    /// The tuning this solver searches with.
    pub fn tuning(&self) -> &SearchTuning {
        &self.tuning
    }

    /// Plan the purchase, reporting search progress to `observer`.
    ///
    /// # Errors
    ///
    /// - [`PlanError::AmountOverflow`]: the gross total does not fit in an `i64`.
    /// - [`PlanError::BudgetExhausted`]: the time budget ran out before any plan reached
    ///   the requested item count.
    /// - [`PlanError::NoTerminalState`]: the search finished without reaching the
    ///   requested item count.
    pub fn solve_with_observer<O: PlanObserver + ?Sized>(
        &self,
        request: &PlanRequest,
        config: &PlannerConfig,
        observer: &mut O,
    ) -> Result<PlanResult, PlanError> {
        let started_at = Instant::now();
        let items = request.items;

        let span = debug_span!("plan", items, starting_points = request.starting_points);
        let _entered = span.enter();

        let economics = OrderEconomics::new(config);

        let gross_total =
            economics
                .checked_order_total(items)
                .ok_or(PlanError::AmountOverflow {
                    items,
                    unit_price: config.unit_price,
                })?;

        // Points beyond what the whole plan could ever spend change nothing.
        let start_balance = request.starting_points.clamp(0, gross_total);

        if items == 0 {
            return Ok(PlanResult::new(
                Vec::new(),
                start_balance,
                gross_total,
                PlanMeta {
                    exact: true,
                    elapsed: started_at.elapsed(),
                },
            ));
        }

        let mut state = SearchState::new(items, start_balance);
        let outcome = self.expand_layers(&mut state, items, &economics, started_at, observer);

        let Some(choice) = select_terminal(state.layers(), items, config.objective) else {
            return Err(if outcome.exact {
                PlanError::NoTerminalState { items }
            } else {
                PlanError::BudgetExhausted {
                    items,
                    layers_expanded: outcome.layers_expanded,
                    budget: self.tuning.time_budget,
                }
            });
        };

        observer.on_terminal_selected(choice.balance, choice.cost, choice.tied);

        debug!(
            balance = choice.balance,
            cost = choice.cost,
            tied = choice.tied,
            "selected terminal state"
        );

        let transitions = reconstruct(state.layers(), items, choice.balance)?;

        let orders = simulate_orders(
            transitions.iter().map(|transition| OrderStep {
                quantity: transition.quantity,
                cash_paid: transition.cash_paid,
                points_used: transition.points_used,
            }),
            start_balance,
            &economics,
        );

        let orders = consolidate(&orders, start_balance, &economics);

        Ok(PlanResult::new(
            orders,
            start_balance,
            gross_total,
            PlanMeta {
                exact: outcome.exact,
                elapsed: started_at.elapsed(),
            },
        ))
    }

    /// Expand layers `0..items` in order until done or out of time.
    ///
    /// Layer 0 is always expanded: it reaches the final layer directly through the
    /// single-order plan, so even an exhausted budget leaves a terminal state to select.
    fn expand_layers<O: PlanObserver + ?Sized>(
        &self,
        state: &mut SearchState,
        items: usize,
        economics: &OrderEconomics,
        started_at: Instant,
        observer: &mut O,
    ) -> SearchOutcome {
        let threshold_quantity = economics.threshold_quantity();
        let mut layers_expanded = 0;

        for layer in 0..items {
            let elapsed = started_at.elapsed();

            if layer > 0 && elapsed > self.tuning.time_budget {
                warn!(
                    layer,
                    ?elapsed,
                    budget = ?self.tuning.time_budget,
                    "time budget exhausted; plan may not be optimal"
                );

                observer.on_budget_exhausted(layer, elapsed);

                return SearchOutcome {
                    exact: false,
                    layers_expanded,
                };
            }

            let states = state.states(layer);

            if states.is_empty() {
                continue;
            }

            for quantity in quantity_candidates(items - layer, threshold_quantity, &self.tuning) {
                expand_quantity(state, &states, layer, quantity, items, economics);
            }

            layers_expanded += 1;

            trace!(
                layer,
                states = states.len(),
                frontier = state.frontier_len(layer),
                "expanded layer"
            );

            observer.on_layer_expanded(layer, states.len(), state.frontier_len(layer));
        }

        SearchOutcome {
            exact: true,
            layers_expanded,
        }
    }
}

/// Whether the search ran to completion, and how far it got.
#[derive(Debug, Clone, Copy)]
struct SearchOutcome {
    exact: bool,
    layers_expanded: usize,
}

/// Relax every transition buying `quantity` items from the given states of `layer`.
fn expand_quantity(
    state: &mut SearchState,
    states: &[LayerState],
    layer: usize,
    quantity: usize,
    items: usize,
    economics: &OrderEconomics,
) {
    let next_layer = layer + quantity;

    if next_layer > items {
        return;
    }

    let order_total = economics.order_total(quantity);
    let remaining_total = economics.order_total(items - next_layer);
    let is_final = next_layer == items;

    for parent in states {
        let balance = parent.balance;

        for cash_paid in cash_candidates(balance, order_total, remaining_total, economics) {
            let points_used = order_total - cash_paid;

            if points_used > balance {
                continue;
            }

            let mut next_balance = economics.balance_after(balance, cash_paid, order_total);

            // The final balance is kept exact for the secondary objective; anything
            // above what the remaining items cost can never be spent.
            if !is_final {
                next_balance = next_balance.min(remaining_total);
            }

            let transition = Transition {
                parent_layer: layer,
                parent_balance: balance,
                quantity,
                cash_paid,
                points_used,
                order_total,
            };

            state.relax(
                next_layer,
                next_balance,
                parent.cost + cash_paid,
                parent.orders + 1,
                transition,
                !is_final,
            );
        }
    }
}
