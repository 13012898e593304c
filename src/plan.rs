//! Plans

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::economics::OrderEconomics;

/// What to plan: how many items, and how many points are already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanRequest {
    /// Number of items to buy in total.
    pub items: usize,

    /// Points held before the first order.
    pub starting_points: i64,
}

impl PlanRequest {
    /// Request `items` items with no points held.
    pub fn new(items: usize) -> Self {
        Self {
            items,
            starting_points: 0,
        }
    }

    /// Set the points held before the first order.
    #[must_use]
    pub fn with_starting_points(mut self, starting_points: i64) -> Self {
        self.starting_points = starting_points;
        self
    }
}

/// A single order to place, as it happens chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    /// 1-based position in the plan.
    pub index: usize,

    /// Items bought in this order.
    pub quantity: usize,

    /// Price of the order before points.
    pub order_total: i64,

    /// Points redeemed against the order.
    pub points_used: i64,

    /// Cash paid for the order.
    pub cash_paid: i64,

    /// Points earned by the order, available from the next order onwards.
    pub points_earned: i64,

    /// Balance after the order.
    pub points_balance: i64,

    /// Whether the order qualified for earning points.
    pub eligible: bool,
}

impl OrderRow {
    /// Returns true if this order may be merged with a neighbouring one without changing
    /// what the plan costs.
    pub fn is_mergeable(&self) -> bool {
        self.points_used == 0 && self.eligible
    }
}

/// The parameters of an order before its earnings are simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStep {
    /// Items bought.
    pub quantity: usize,

    /// Cash paid.
    pub cash_paid: i64,

    /// Points redeemed.
    pub points_used: i64,
}

/// Aggregate figures for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Number of orders placed.
    pub order_count: usize,

    /// Total cash paid across all orders.
    pub cash_total: i64,

    /// Points left after the last order.
    pub leftover_points: i64,

    /// Price of all items before points (`items × unit_price`).
    pub gross_total: i64,

    /// Points held before the first order, after clamping.
    pub starting_points: i64,
}

/// How the plan was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanMeta {
    /// False if the time budget cut the search short.
    pub exact: bool,

    /// Wall-clock time spent planning, serialized as whole milliseconds.
    #[serde(rename = "time_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// A complete purchase plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    /// Orders in chronological order.
    pub orders: Vec<OrderRow>,

    /// Totals for the plan.
    pub summary: PlanSummary,

    /// Search metadata.
    pub meta: PlanMeta,
}

impl PlanResult {
    /// Assemble a result from simulated orders.
    pub fn new(orders: Vec<OrderRow>, starting_points: i64, gross_total: i64, meta: PlanMeta) -> Self {
        let summary = PlanSummary {
            order_count: orders.len(),
            cash_total: orders.iter().map(|order| order.cash_paid).sum(),
            leftover_points: orders
                .last()
                .map_or(starting_points, |order| order.points_balance),
            gross_total,
            starting_points,
        };

        Self {
            orders,
            summary,
            meta,
        }
    }

    /// Cash saved relative to paying the gross total.
    pub fn savings(&self) -> i64 {
        self.summary.gross_total - self.summary.cash_total
    }
}

/// Replay order steps from `starting_points`, computing eligibility, earnings and
/// balances for each.
pub fn simulate_orders(
    steps: impl IntoIterator<Item = OrderStep>,
    starting_points: i64,
    economics: &OrderEconomics,
) -> Vec<OrderRow> {
    let mut balance = starting_points;

    steps
        .into_iter()
        .enumerate()
        .map(|(idx, step)| {
            let order_total = step.cash_paid + step.points_used;
            let eligible = economics.eligible(order_total, step.cash_paid);
            let points_earned = economics.points_earned(step.cash_paid, order_total);

            balance = balance - step.points_used + points_earned;

            OrderRow {
                index: idx + 1,
                quantity: step.quantity,
                order_total,
                points_used: step.points_used,
                cash_paid: step.cash_paid,
                points_earned,
                points_balance: balance,
                eligible,
            }
        })
        .collect()
}
