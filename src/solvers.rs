//! Solvers for Purchase Plans

use std::time::Duration;

use thiserror::Error;

use crate::{
    config::PlannerConfig,
    plan::{PlanRequest, PlanResult},
};

pub mod layered;

/// Planning Errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Every layer was explored, but no explored transition reaches the requested item count.
    #[error("no plan buying {items} items was found among the explored orders")]
    NoTerminalState {
        /// Number of items requested
        items: usize,
    },

    /// The time budget ran out before any plan reached the requested item count.
    #[error(
        "time budget of {budget:?} ran out after {layers_expanded} layers without reaching {items} items"
    )]
    BudgetExhausted {
        /// Number of items requested
        items: usize,

        /// Layers fully expanded before the budget ran out
        layers_expanded: usize,

        /// The budget that was exceeded
        budget: Duration,
    },

    /// The gross total of the request does not fit in an `i64`.
    #[error("{items} items at {unit_price} per item overflows the supported amount range")]
    AmountOverflow {
        /// Number of items requested
        items: usize,

        /// Unit price of each item
        unit_price: i64,
    },

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

impl PlanError {
    /// Returns true if retrying with a larger time budget could succeed.
    pub fn is_budget_related(&self) -> bool {
        matches!(self, PlanError::BudgetExhausted { .. })
    }
}

/// Trait for planning how to split a purchase into orders
pub trait Solver {
    /// Plan the purchase described by `request` under `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if no plan reaches the requested item count.
    fn solve(&self, request: &PlanRequest, config: &PlannerConfig)
    -> Result<PlanResult, PlanError>;
}
