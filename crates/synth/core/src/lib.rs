//! Deterministic core of a turn-based crafting synthesis.
//!
//! The crate models a synthesis as a chain of immutable, content-addressed
//! states: each action derives a successor from its parent and records the
//! lineage without ever mutating upstream states. Action legality and
//! effects are declarative const tables of function pointers, dispatched
//! by [`ActionKind`]. Cost scaling and scoring formulas stay outside the
//! crate behind the [`env`] oracle traits, so external search drivers can
//! swap tunings without touching the core.
//!
//! Typical flow:
//!
//! 1. Build a root with [`CraftState::initial`].
//! 2. Wrap oracles in a [`SynthEnv`] and hand it to [`SynthEngine`].
//! 3. Loop: pick from [`SynthEngine::usable_actions`], derive a successor
//!    with [`SynthEngine::execute`], then advance buff timers with
//!    [`SynthEngine::tick_step`].

pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod state;

pub use action::{
    ActionKind, ActionProfile, ActionSpec, SuccessOperator, UsageCheck,
    buff::{BuffBehavior, TickFn, TurnsBinding},
};
pub use config::SynthConfig;
pub use engine::{ExecuteError, SynthEngine};
pub use env::{BaselineCompute, ComputeOracle, Env, StaticTables, SynthEnv, TablesOracle};
pub use state::{
    AttributeStore, Condition, CrafterStats, CraftState, InitializationError, Recipe,
    SynthesisStatus,
};
