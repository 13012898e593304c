//! Search Observer

use std::time::Duration;

/// Observer trait for following a layered search as it runs.
///
/// Callbacks fire at layer boundaries only, never per transition, so observing a
/// search does not change its cost profile.
pub trait PlanObserver {
    /// Called after a layer has been fully expanded.
    ///
    /// # Parameters
    ///
    /// - `layer`: Items bought so far in the expanded states
    /// - `states`: Number of states expanded
    /// - `frontier`: Number of frontier entries retained for the layer
    fn on_layer_expanded(&mut self, _layer: usize, _states: usize, _frontier: usize) {}

    /// Called when the time budget expires before `layer` is expanded.
    fn on_budget_exhausted(&mut self, _layer: usize, _elapsed: Duration) {}

    /// Called once the terminal state has been chosen.
    ///
    /// # Parameters
    ///
    /// - `balance`: Leftover balance of the chosen terminal state
    /// - `cost`: Total cash of the chosen terminal state
    /// - `tied`: Number of terminal balances sharing the minimum cost
    fn on_terminal_selected(&mut self, _balance: i64, _cost: i64, _tied: usize) {}
}

/// No-op observer for unobserved solves.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_callbacks_are_callable() {
        let mut observer = NoopObserver;
        let obs: &mut dyn PlanObserver = &mut observer;

        obs.on_layer_expanded(0, 1, 1);
        obs.on_budget_exhausted(1, Duration::ZERO);
        obs.on_terminal_selected(0, 0, 1);
    }
}
