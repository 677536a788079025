//! Cost and scoring collaborator boundary.

use crate::state::CraftState;

/// External probability/scoring formulas.
///
/// The core calls these but never implements them: condition-, buff-, and
/// level-sensitive math lives outside this crate. Implementations must be
/// pure functions of the supplied state.
pub trait ComputeOracle: Send + Sync {
    /// Effective CP price of an action with the given base cost.
    fn cp_cost(&self, base: u32, state: &CraftState) -> u32;

    /// Scalar desirability of a state for the external search.
    fn state_score(&self, state: &CraftState) -> f64;

    /// Probability in `[0, 1]` that the next action fails.
    fn failure_probability(&self, state: &CraftState) -> f64;
}

/// Identity collaborator: base costs pass through unscaled, every state
/// scores zero, and nothing ever fails. Useful for tests and for drivers
/// without tuned formulas.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineCompute;

impl ComputeOracle for BaselineCompute {
    fn cp_cost(&self, base: u32, _state: &CraftState) -> u32 {
        base
    }

    fn state_score(&self, _state: &CraftState) -> f64 {
        0.0
    }

    fn failure_probability(&self, _state: &CraftState) -> f64 {
        0.0
    }
}
