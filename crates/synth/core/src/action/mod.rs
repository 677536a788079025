//! Action framework: legality predicates, effect operators, dispatch.
//!
//! Every action is a closed tagged variant backed by an [`ActionSpec`]
//! capability record: an ordered list of usage checks (ANDed for
//! legality) and an ordered list of success operators (the action's game
//! effect). Both lists are composed once as `const` tables, shared base
//! entries first, kind-specific entries appended. Dispatch is a match on
//! [`ActionKind`], with no virtual calls and no runtime type inspection,
//! which keeps the transition function data-oriented and trivially safe
//! to run from many threads at once.
//!
//! Illegality is an ordinary boolean outcome, never an error: drivers
//! consult [`is_usable`] before deriving a successor state and must not
//! run [`apply_effects`] for an action that failed its checks.

pub mod buff;
mod kinds;
mod profile;

pub use profile::ActionProfile;

use crate::env::SynthEnv;
use crate::state::CraftState;

/// Legality predicate: may `kind` be played from `state`?
pub type UsageCheck = fn(ActionKind, &CraftState, &SynthEnv<'_>) -> bool;

/// Effect procedure run against a freshly derived state after legality
/// has been confirmed. Receives the pre-action state for reference.
pub type SuccessOperator = fn(ActionKind, &CraftState, &mut CraftState, &SynthEnv<'_>);

/// Capability record backing one action kind.
#[derive(Clone, Copy, Debug)]
pub struct ActionSpec {
    /// Evaluated in registration order; all must pass.
    pub usage_checks: &'static [UsageCheck],
    /// Run in registration order against the derived state.
    pub success_operators: &'static [SuccessOperator],
    /// Timer contract, present for buff actions only.
    pub buff: Option<buff::BuffBehavior>,
}

/// Closed set of actions implemented by this core.
///
/// Non-buff actions (plain progress/quality touches) live in the external
/// catalog; the core only defines the buff roster and the framework they
/// plug into.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    SteadyHand,
    InnerQuiet,
    Manipulation,
    Ingenuity,
    GreatStrides,
}

impl ActionKind {
    /// Capability table for this kind.
    pub fn spec(self) -> &'static ActionSpec {
        match self {
            Self::SteadyHand => &kinds::STEADY_HAND,
            Self::InnerQuiet => &kinds::INNER_QUIET,
            Self::Manipulation => &kinds::MANIPULATION,
            Self::Ingenuity => &kinds::INGENUITY,
            Self::GreatStrides => &kinds::GREAT_STRIDES,
        }
    }
}

/// True when every usage check passes, base checks first.
pub fn is_usable(kind: ActionKind, state: &CraftState, env: &SynthEnv<'_>) -> bool {
    kind.spec()
        .usage_checks
        .iter()
        .all(|check| check(kind, state, env))
}

/// Runs the success operators in registration order.
///
/// `new` must be freshly derived from `old`, and legality must already
/// have been confirmed via [`is_usable`].
pub fn apply_effects(
    kind: ActionKind,
    old: &CraftState,
    new: &mut CraftState,
    env: &SynthEnv<'_>,
) {
    for operator in kind.spec().success_operators {
        operator(kind, old, new, env);
    }
}

// ============================================================================
// Shared base contract
// ============================================================================
// Every costed action gates on and then spends its scaled CP price. These
// are registered first in each kind's tables, ahead of the buff guard and
// any kind-specific entries.

pub(crate) fn can_afford_cp(kind: ActionKind, state: &CraftState, env: &SynthEnv<'_>) -> bool {
    let profile = env.tables().action_profile(kind);
    env.compute().cp_cost(profile.cp_cost, state) <= state.cp()
}

pub(crate) fn spend_cp(
    kind: ActionKind,
    old: &CraftState,
    new: &mut CraftState,
    env: &SynthEnv<'_>,
) {
    let profile = env.tables().action_profile(kind);
    // Scale against the pre-action state, the same view the gate saw.
    let cost = env.compute().cp_cost(profile.cp_cost, old);
    let remaining = new.cp().saturating_sub(cost);
    new.attributes_mut().set_cp(remaining);
}
