use gridstar_core::Point;

use crate::observe::Observation;

/// Step costs and remaining-cost estimates used by the engine.
///
/// Both functions must return non-negative values.
pub trait CostModel {
    /// Cost of moving from `from` to the adjacent cell `to`.
    fn step_cost(&self, from: Point, to: Point) -> i32;

    /// Estimated cost of reaching `goal` from `from`.
    ///
    /// Not required to be admissible; the engine makes no optimality claim.
    fn heuristic(&self, from: Point, goal: Point) -> i32;
}

/// Receives one [`Observation`] per engine step.
///
/// This is the only coupling between the engine and renderers, loggers or
/// pacing logic.
pub trait SearchObserver {
    fn observe(&mut self, obs: &Observation);
}

impl<F: FnMut(&Observation)> SearchObserver for F {
    fn observe(&mut self, obs: &Observation) {
        self(obs)
    }
}
