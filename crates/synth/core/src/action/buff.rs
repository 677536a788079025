//! Turn-limited buff contract layered on the action framework.
//!
//! A buff binds one timer field in the attribute store. Applying it sets
//! the timer to `buff_duration + 1`: the extra turn pays for the tick at
//! the end of the application turn, leaving the buff live for
//! `buff_duration` turns net. Ticking is the sole mechanism that advances
//! timers; the driver invokes it once per tracked buff per elapsed step,
//! and a tick at zero is a no-op.

use crate::env::SynthEnv;
use crate::state::{AttributeStore, CraftState};

use super::ActionKind;

/// Getter/setter pair bound to one timer field in the store.
#[derive(Clone, Copy, Debug)]
pub struct TurnsBinding {
    pub get: fn(&AttributeStore) -> u32,
    pub set: fn(&mut AttributeStore, u32),
}

/// Per-step decay hook.
pub type TickFn = fn(ActionKind, &mut CraftState, &SynthEnv<'_>);

/// Buff contract attached to an [`super::ActionSpec`].
#[derive(Clone, Copy, Debug)]
pub struct BuffBehavior {
    pub turns: TurnsBinding,
    /// Usually [`tick_default`]; kinds with side effects on decay
    /// substitute their own hook.
    pub tick: TickFn,
}

fn behavior(kind: ActionKind) -> Option<&'static BuffBehavior> {
    kind.spec().buff.as_ref()
}

/// Remaining turns on the buff's timer; 0 for non-buff kinds.
pub fn turns_remaining(kind: ActionKind, details: &AttributeStore) -> u32 {
    behavior(kind).map_or(0, |buff| (buff.turns.get)(details))
}

pub(crate) fn set_turns_remaining(kind: ActionKind, details: &mut AttributeStore, turns: u32) {
    if let Some(buff) = behavior(kind) {
        (buff.turns.set)(details, turns);
    }
}

/// A buff is active while its timer is nonzero.
pub fn is_active(kind: ActionKind, details: &AttributeStore) -> bool {
    turns_remaining(kind, details) > 0
}

/// Base legality guard: buffs do not refresh by re-application.
pub(crate) fn check_inactive(kind: ActionKind, state: &CraftState, _env: &SynthEnv<'_>) -> bool {
    !is_active(kind, state.attributes())
}

/// Base success operator: installs the timer on the derived state.
pub(crate) fn apply_operator(
    kind: ActionKind,
    _old: &CraftState,
    new: &mut CraftState,
    env: &SynthEnv<'_>,
) {
    apply(kind, new, env);
}

/// Sets the timer to `buff_duration + 1` and records the buff in the
/// state's temp-effect list.
pub fn apply(kind: ActionKind, state: &mut CraftState, env: &SynthEnv<'_>) {
    let duration = env.tables().action_profile(kind).buff_duration;
    set_turns_remaining(kind, state.attributes_mut(), duration + 1);
    state.track_effect(kind);
}

/// Advances the buff's timer by one elapsed step, dispatching the kind's
/// decay hook. Idempotent once the timer reaches zero.
pub fn tick(kind: ActionKind, state: &mut CraftState, env: &SynthEnv<'_>) {
    if let Some(buff) = behavior(kind) {
        (buff.tick)(kind, state, env);
    }
}

/// Default decay: decrement, floored at zero.
pub(crate) fn tick_default(kind: ActionKind, state: &mut CraftState, _env: &SynthEnv<'_>) {
    let remaining = turns_remaining(kind, state.attributes());
    if remaining > 0 {
        set_turns_remaining(kind, state.attributes_mut(), remaining - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CrafterStats, Recipe};

    fn state() -> CraftState {
        CraftState::initial(
            &CrafterStats {
                craftsmanship: 100,
                control: 100,
                cp: 300,
                level: 20,
            },
            &Recipe {
                level: 20,
                durability: 40,
                progress: 74,
                quality: 1053,
            },
        )
        .unwrap()
    }

    #[test]
    fn lifecycle_runs_from_application_to_rest() {
        let env = SynthEnv::baseline();
        let mut state = state();
        let kind = ActionKind::GreatStrides; // duration 3

        assert!(!is_active(kind, state.attributes()));
        apply(kind, &mut state, &env);
        assert_eq!(turns_remaining(kind, state.attributes()), 4);
        assert_eq!(state.temp_effects(), [kind]);

        for expected in [3, 2, 1, 0] {
            tick(kind, &mut state, &env);
            assert_eq!(turns_remaining(kind, state.attributes()), expected);
        }
        assert!(!is_active(kind, state.attributes()));

        // A fifth tick stays at rest; no underflow.
        tick(kind, &mut state, &env);
        assert_eq!(turns_remaining(kind, state.attributes()), 0);
    }

    #[test]
    fn timers_decay_independently() {
        let env = SynthEnv::baseline();
        let mut state = state();
        apply(ActionKind::SteadyHand, &mut state, &env); // duration 5 -> 6
        apply(ActionKind::GreatStrides, &mut state, &env); // duration 3 -> 4

        state.tick_effects(&env);
        assert_eq!(
            turns_remaining(ActionKind::SteadyHand, state.attributes()),
            5
        );
        assert_eq!(
            turns_remaining(ActionKind::GreatStrides, state.attributes()),
            3
        );
        assert_eq!(
            state.temp_effects(),
            [ActionKind::SteadyHand, ActionKind::GreatStrides]
        );
    }

    #[test]
    fn expired_effects_are_pruned_in_order() {
        let env = SynthEnv::baseline();
        let mut state = state();
        apply(ActionKind::GreatStrides, &mut state, &env); // 4 ticks to rest
        apply(ActionKind::SteadyHand, &mut state, &env); // 6 ticks to rest

        for _ in 0..4 {
            state.tick_effects(&env);
        }
        assert_eq!(state.temp_effects(), [ActionKind::SteadyHand]);

        for _ in 0..2 {
            state.tick_effects(&env);
        }
        assert!(state.temp_effects().is_empty());
    }
}
