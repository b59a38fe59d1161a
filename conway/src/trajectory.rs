// trajectory.rs - Long-run behaviour of a board: extinction, still life,
// oscillation, or undetermined within an iteration budget.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::engine::Engine;
use crate::grid::{Grid, GridKey};

/// Outcome of `Engine::final_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalState {
    /// Board at the point the run stopped.
    pub final_grid: Grid,
    /// Extinct, fixed, or cycling. Oscillators count as stable.
    pub is_stable: bool,
    /// Generations computed before the run stopped.
    pub iterations: usize,
    pub is_cyclic: bool,
    /// Generations between two visits of the same board; 0 unless cyclic.
    pub cycle_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Behavior {
    Extinct,
    StillLife,
    Oscillator { period: usize },
    Undetermined,
}

impl FinalState {
    fn settled(final_grid: Grid, iterations: usize) -> Self {
        Self { final_grid, is_stable: true, iterations, is_cyclic: false, cycle_length: 0 }
    }

    fn cyclic(final_grid: Grid, iterations: usize, cycle_length: usize) -> Self {
        Self { final_grid, is_stable: true, iterations, is_cyclic: true, cycle_length }
    }

    fn unsettled(final_grid: Grid, iterations: usize) -> Self {
        Self { final_grid, is_stable: false, iterations, is_cyclic: false, cycle_length: 0 }
    }

    pub fn behavior(&self) -> Behavior {
        match (self.is_stable, self.is_cyclic) {
            (true, true) => Behavior::Oscillator { period: self.cycle_length },
            (true, false) if self.final_grid.is_extinct() => Behavior::Extinct,
            (true, false) => Behavior::StillLife,
            (false, _) => Behavior::Undetermined,
        }
    }
}

impl Engine {
    /// Final state using the configured iteration ceiling.
    pub fn settle(&self, grid: &Grid) -> FinalState {
        self.final_state(grid, self.config().max_iterations)
    }

    /// Steps `grid` until it dies out, stops changing, or revisits an
    /// earlier board, giving up after `max_iterations` generations.
    ///
    /// The history maps each board's key to the generation index of that
    /// board, recorded once its successor has been computed. A board seen
    /// again at generation `i` after first appearing at `p` reports a cycle
    /// of `i - p`.
    pub fn final_state(&self, grid: &Grid, max_iterations: usize) -> FinalState {
        let mut current = Arc::new(grid.clone());
        let mut history: HashMap<GridKey, usize> = HashMap::new();
        let mut iteration = 0;

        while iteration < max_iterations {
            if current.is_extinct() {
                debug!(iteration, "board died out");
                return FinalState::settled(Arc::unwrap_or_clone(current), iteration);
            }

            let next = self.step_shared(&current);
            iteration += 1;

            if next == *current {
                debug!(iteration, "board reached a still life");
                return FinalState::settled(next, iteration);
            }

            if let Some(&first_seen) = history.get(&next.canonical_key()) {
                let cycle_length = iteration - first_seen;
                debug!(iteration, cycle_length, "board entered a cycle");
                return FinalState::cyclic(next, iteration, cycle_length);
            }

            history.insert(current.canonical_key(), iteration - 1);
            current = Arc::new(next);
        }

        debug!(max_iterations, visited = history.len(), "iteration budget exhausted");
        FinalState::unsettled(Arc::unwrap_or_clone(current), iteration)
    }
}
