//! Concrete buff actions.
//!
//! Each capability table composes the shared base contract (CP gate,
//! CP spend, buff guard, timer installation) with the kind's own policy
//! checks and decay behavior.

use crate::config::SynthConfig;
use crate::env::SynthEnv;
use crate::state::{AttributeStore, CraftState};

use super::buff::{self, BuffBehavior, TurnsBinding};
use super::{ActionKind, ActionSpec, can_afford_cp, spend_cp};

pub(super) const STEADY_HAND: ActionSpec = ActionSpec {
    usage_checks: &[can_afford_cp, buff::check_inactive, steady_hand_policy],
    success_operators: &[spend_cp, buff::apply_operator],
    buff: Some(BuffBehavior {
        turns: TurnsBinding {
            get: AttributeStore::steady_hand_turns,
            set: AttributeStore::set_steady_hand_turns,
        },
        tick: buff::tick_default,
    }),
};

/// Below the safe durability line a Steady Hand proc would be wasted on
/// repair, so only allow it when the crafter cannot afford to restore
/// durability directly and needs the safety anyway.
fn steady_hand_policy(_kind: ActionKind, state: &CraftState, env: &SynthEnv<'_>) -> bool {
    if state.durability() >= SynthConfig::SAFE_DURABILITY {
        return true;
    }
    let repair_cost = env
        .compute()
        .cp_cost(SynthConfig::DURABILITY_RESTORE_BASE_CP, state);
    state.cp() < repair_cost
}

// Stack mechanics are not implemented yet: the catalog marks the action
// disabled and the placeholder binding reports the buff as never active.
pub(super) const INNER_QUIET: ActionSpec = ActionSpec {
    usage_checks: &[can_afford_cp, buff::check_inactive],
    success_operators: &[spend_cp, buff::apply_operator],
    buff: Some(BuffBehavior {
        turns: TurnsBinding {
            get: inner_quiet_turns,
            set: set_inner_quiet_turns,
        },
        tick: buff::tick_default,
    }),
};

fn inner_quiet_turns(_details: &AttributeStore) -> u32 {
    0
}

fn set_inner_quiet_turns(_details: &mut AttributeStore, _turns: u32) {}

pub(super) const MANIPULATION: ActionSpec = ActionSpec {
    usage_checks: &[can_afford_cp, buff::check_inactive],
    success_operators: &[spend_cp, buff::apply_operator],
    buff: Some(BuffBehavior {
        turns: TurnsBinding {
            get: AttributeStore::manipulation_turns,
            set: AttributeStore::set_manipulation_turns,
        },
        tick: manipulation_tick,
    }),
};

/// Restores durability on every tick except the first one after
/// application: the timer starts at `duration + 1`, so the pre-tick
/// remainder only drops to the base duration once the buff has been live
/// for a full turn.
fn manipulation_tick(kind: ActionKind, state: &mut CraftState, env: &SynthEnv<'_>) {
    let duration = env.tables().action_profile(kind).buff_duration;
    let before = buff::turns_remaining(kind, state.attributes());
    buff::tick_default(kind, state, env);

    if before > 0 && before <= duration {
        let restored =
            (state.durability() + SynthConfig::MANIPULATION_REGEN).min(state.max_durability());
        state.attributes_mut().set_durability(restored);
    }
}

pub(super) const INGENUITY: ActionSpec = ActionSpec {
    usage_checks: &[can_afford_cp, buff::check_inactive, ingenuity_policy],
    success_operators: &[spend_cp, buff::apply_operator],
    buff: Some(BuffBehavior {
        turns: TurnsBinding {
            get: AttributeStore::ingenuity_turns,
            set: AttributeStore::set_ingenuity_turns,
        },
        tick: buff::tick_default,
    }),
};

/// Worth using only when meaningfully under-leveled.
fn ingenuity_policy(_kind: ActionKind, state: &CraftState, _env: &SynthEnv<'_>) -> bool {
    state.level_surplus() <= -2
}

pub(super) const GREAT_STRIDES: ActionSpec = ActionSpec {
    usage_checks: &[can_afford_cp, buff::check_inactive, great_strides_policy],
    success_operators: &[spend_cp, buff::apply_operator],
    buff: Some(BuffBehavior {
        turns: TurnsBinding {
            get: AttributeStore::great_strides_turns,
            set: AttributeStore::set_great_strides_turns,
        },
        tick: buff::tick_default,
    }),
};

/// Pointless once quality is already capped.
fn great_strides_policy(_kind: ActionKind, state: &CraftState, _env: &SynthEnv<'_>) -> bool {
    state.quality() < state.max_quality()
}
