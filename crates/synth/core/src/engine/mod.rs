//! Driver-facing execution pipeline.
//!
//! [`SynthEngine`] is the seam an external search walks: it answers which
//! actions are legal for a state, derives successor states, and advances
//! buff timers at the end of each step. Deriving never mutates the
//! parent, so independent searches may branch from a shared ancestor
//! concurrently without locking.

mod errors;

pub use errors::ExecuteError;

use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::action::{self, ActionKind};
use crate::env::SynthEnv;
use crate::state::CraftState;

pub struct SynthEngine<'a> {
    env: SynthEnv<'a>,
}

impl<'a> SynthEngine<'a> {
    pub fn new(env: SynthEnv<'a>) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &SynthEnv<'a> {
        &self.env
    }

    /// All enabled actions whose usage checks pass for `state`.
    ///
    /// Disabled catalog entries are filtered here, not inside the action's
    /// own checks.
    pub fn usable_actions(&self, state: &CraftState) -> Vec<ActionKind> {
        ActionKind::iter()
            .filter(|kind| self.env.tables().action_profile(*kind).enabled)
            .filter(|kind| action::is_usable(*kind, state, &self.env))
            .collect()
    }

    /// Derives the successor of `parent` under `kind` and applies the
    /// action's effects to it. The parent is never mutated.
    ///
    /// Buff timers do not advance here; call [`Self::tick_step`] once per
    /// elapsed step after the action resolves.
    pub fn execute(
        &self,
        parent: &Arc<CraftState>,
        kind: ActionKind,
    ) -> Result<CraftState, ExecuteError> {
        if !self.env.tables().action_profile(kind).enabled {
            return Err(ExecuteError::Disabled(kind));
        }
        if !action::is_usable(kind, parent, &self.env) {
            return Err(ExecuteError::NotUsable(kind));
        }

        let mut next = CraftState::derive(parent, kind);
        action::apply_effects(kind, parent, &mut next, &self.env);
        Ok(next)
    }

    /// End-of-step decay pass: ticks every tracked buff once and drops
    /// the ones whose timers ran out.
    pub fn tick_step(&self, state: &mut CraftState) {
        state.tick_effects(&self.env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CrafterStats, Recipe};

    fn root() -> Arc<CraftState> {
        Arc::new(
            CraftState::initial(
                &CrafterStats {
                    craftsmanship: 100,
                    control: 100,
                    cp: 300,
                    level: 20,
                },
                &Recipe {
                    level: 20,
                    durability: 60,
                    progress: 74,
                    quality: 1053,
                },
            )
            .unwrap(),
        )
    }

    #[test]
    fn usable_actions_filter_disabled_and_gated_kinds() {
        let engine = SynthEngine::new(SynthEnv::baseline());
        let actions = engine.usable_actions(&root());

        // Inner Quiet ships disabled; Ingenuity needs a level deficit.
        assert_eq!(
            actions,
            [
                ActionKind::SteadyHand,
                ActionKind::Manipulation,
                ActionKind::GreatStrides,
            ]
        );
    }

    #[test]
    fn execute_rejects_disabled_actions() {
        let engine = SynthEngine::new(SynthEnv::baseline());
        assert_eq!(
            engine.execute(&root(), ActionKind::InnerQuiet),
            Err(ExecuteError::Disabled(ActionKind::InnerQuiet))
        );
    }

    #[test]
    fn execute_rejects_failed_usage_checks() {
        let engine = SynthEngine::new(SynthEnv::baseline());
        assert_eq!(
            engine.execute(&root(), ActionKind::Ingenuity),
            Err(ExecuteError::NotUsable(ActionKind::Ingenuity))
        );
    }

    #[test]
    fn execute_derives_without_mutating_the_parent() {
        let engine = SynthEngine::new(SynthEnv::baseline());
        let parent = root();
        let next = engine.execute(&parent, ActionKind::SteadyHand).unwrap();

        assert_eq!(next.step(), 2);
        assert_eq!(next.cp(), 300 - 22);
        assert_eq!(next.attributes().steady_hand_turns(), 6);
        assert_eq!(next.leading_action(), Some(ActionKind::SteadyHand));
        assert!(Arc::ptr_eq(next.previous().unwrap(), &parent));

        assert_eq!(parent.cp(), 300);
        assert_eq!(parent.attributes().steady_hand_turns(), 0);
        assert!(parent.temp_effects().is_empty());
    }

    #[test]
    fn active_buff_blocks_reapplication_until_it_expires() {
        let engine = SynthEngine::new(SynthEnv::baseline());
        let parent = root();
        let mut state = engine.execute(&parent, ActionKind::GreatStrides).unwrap();

        let parent = Arc::new(state.clone());
        assert_eq!(
            engine.execute(&parent, ActionKind::GreatStrides),
            Err(ExecuteError::NotUsable(ActionKind::GreatStrides))
        );

        for _ in 0..4 {
            engine.tick_step(&mut state);
        }
        assert!(state.temp_effects().is_empty());
        let parent = Arc::new(state);
        assert!(engine.execute(&parent, ActionKind::GreatStrides).is_ok());
    }
}
