//! Terminal Selection & Reconstruction

use crate::{
    config::Objective,
    solvers::{
        PlanError,
        layered::state::{Layer, Transition},
    },
};

/// The terminal state a plan is reconstructed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalChoice {
    /// Leftover balance of the chosen state.
    pub balance: i64,

    /// Total cash of the chosen state.
    pub cost: i64,

    /// Number of terminal balances sharing the minimum cost.
    pub tied: usize,
}

/// Choose the terminal state of layer `items` under `objective`.
///
/// Returns `None` if the layer holds no states.
pub fn select_terminal(layers: &[Layer], items: usize, objective: Objective) -> Option<TerminalChoice> {
    let terminal = layers.get(items)?;
    let cost = terminal.values().map(|entry| entry.cost).min()?;

    let mut tied: Vec<i64> = terminal
        .iter()
        .filter(|(_, entry)| entry.cost == cost)
        .map(|(&balance, _)| balance)
        .collect();

    tied.sort_unstable();

    let balance = match objective {
        Objective::MinLeftover => tied.first().copied(),
        Objective::MinOrders => tied
            .iter()
            .copied()
            .min_by_key(|&balance| count_orders(layers, items, balance)),
    }?;

    Some(TerminalChoice {
        balance,
        cost,
        tied: tied.len(),
    })
}

/// Number of transitions on the back-pointer chain from `(layer, balance)` to the root.
pub fn count_orders(layers: &[Layer], layer: usize, balance: i64) -> usize {
    back_pointers(layers, layer, balance).count()
}

/// Walk back-pointers from `(layer, balance)` to the root and return the transitions in
/// chronological order.
///
/// # Errors
///
/// Returns [`PlanError::InvariantViolation`] if the chain is broken before reaching
/// layer 0.
pub fn reconstruct(layers: &[Layer], layer: usize, balance: i64) -> Result<Vec<Transition>, PlanError> {
    let mut transitions: Vec<Transition> = back_pointers(layers, layer, balance).collect();

    let reached_root = transitions
        .last()
        .map_or(layer, |transition| transition.parent_layer)
        == 0;

    if !reached_root {
        return Err(PlanError::InvariantViolation {
            message: "back-pointer chain does not reach the root layer",
        });
    }

    transitions.reverse();

    Ok(transitions)
}

fn back_pointers(layers: &[Layer], layer: usize, balance: i64) -> impl Iterator<Item = Transition> + '_ {
    let mut cursor = Some((layer, balance));

    std::iter::from_fn(move || {
        let (layer, balance) = cursor?;
        let parent = layers.get(layer)?.get(&balance)?.parent?;

        // Layers strictly decrease along the chain, so the walk always terminates.
        cursor = (parent.parent_layer < layer).then_some((parent.parent_layer, parent.parent_balance));

        Some(parent)
    })
}
