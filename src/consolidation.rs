//! Order Consolidation
//!
//! The search often reaches the cheapest plan through several back-to-back eligible
//! orders paid fully in cash. Placing them as one order costs the same cash, and because
//! `floor(a) + floor(b) <= floor(a + b)` it earns at least as many points.

use tracing::debug;

use crate::{
    economics::OrderEconomics,
    plan::{OrderRow, OrderStep, simulate_orders},
};

/// Merge every run of two or more consecutive eligible, cash-only orders into a single
/// order and re-simulate balances from `starting_points`.
///
/// Ineligible orders are never merged: a combined total could cross the eligibility
/// threshold and earn points the search never accounted for.
pub fn consolidate(
    orders: &[OrderRow],
    starting_points: i64,
    economics: &OrderEconomics,
) -> Vec<OrderRow> {
    if orders.len() <= 1 {
        return orders.to_vec();
    }

    let steps: Vec<OrderStep> = orders
        .chunk_by(|a, b| a.is_mergeable() && b.is_mergeable())
        .map(|run| OrderStep {
            quantity: run.iter().map(|order| order.quantity).sum(),
            cash_paid: run.iter().map(|order| order.cash_paid).sum(),
            points_used: run.iter().map(|order| order.points_used).sum(),
        })
        .collect();

    if steps.len() == orders.len() {
        return orders.to_vec();
    }

    debug!(
        before = orders.len(),
        after = steps.len(),
        "consolidated cash-only orders"
    );

    simulate_orders(steps, starting_points, economics)
}
