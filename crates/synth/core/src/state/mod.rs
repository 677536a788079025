//! Synthesis state snapshots and provenance.
//!
//! This module owns the packed attribute store, the per-step snapshot
//! type, and root-state construction. Snapshots are immutable by
//! convention: deriving a successor never mutates its ancestor, so an
//! external search can branch from a shared ancestor on independent
//! threads without locking.

pub mod attributes;
mod condition;

pub use attributes::AttributeStore;
pub use condition::Condition;

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::action::{ActionKind, buff};
use crate::config::SynthConfig;
use crate::env::SynthEnv;

/// Outcome classification derived from the packed attributes.
///
/// Never stored: completion takes precedence over a bust, so a synth that
/// reaches full progress on its last point of durability still completes.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SynthesisStatus {
    InProgress,
    Busted,
    Completed,
}

/// Crafter-side starting values for a synthesis attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrafterStats {
    pub craftsmanship: u32,
    pub control: u32,
    pub cp: u32,
    pub level: u32,
}

/// Recipe-side parameters: targets the synthesis works toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub level: u32,
    pub durability: u32,
    pub progress: u32,
    pub quality: u32,
}

/// Errors raised while building a root state from recipe/crafter input.
///
/// Unlike an oversized write during a transition (a caller bug, handled
/// by a panic in the attribute store), out-of-range *starting* values come
/// from external data and are reported as ordinary errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InitializationError {
    #[error("{stat} = {value} exceeds the storable maximum {max}")]
    StatOutOfRange {
        stat: &'static str,
        value: u32,
        max: u32,
    },
}

fn checked(stat: &'static str, value: u32, max: u32) -> Result<u32, InitializationError> {
    if value > max {
        return Err(InitializationError::StatOutOfRange { stat, value, max });
    }
    Ok(value)
}

/// Ordered list of currently tracked temporary enhancements.
pub(crate) type TempEffects = ArrayVec<ActionKind, { SynthConfig::MAX_TEMP_EFFECTS }>;

/// A snapshot of the synthesis at one step.
///
/// Identity is content-addressed: equality and hashing cover only the
/// packed attributes, so two states reached through different action
/// sequences with identical attribute values are equal and
/// interchangeable to a memoizing search. The provenance links
/// (`previous`, `leading_action`) exist for replay and debugging and are
/// excluded from identity, serialization, and ownership reasoning.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftState {
    details: AttributeStore,
    step: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    previous: Option<Arc<CraftState>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    leading_action: Option<ActionKind>,
    temp_effects: TempEffects,
}

impl CraftState {
    /// Builds the root state of a fresh synthesis.
    ///
    /// Progress and quality start at zero, CP and durability at their
    /// maximums, all buff timers at zero, `step` at 1, and there is no
    /// provenance. Every supplied value is validated against its field
    /// width before it touches the store.
    pub fn initial(crafter: &CrafterStats, recipe: &Recipe) -> Result<Self, InitializationError> {
        let mut details = AttributeStore::new();

        details.set_craftsmanship(checked(
            "craftsmanship",
            crafter.craftsmanship,
            AttributeStore::CRAFTSMANSHIP_MAX,
        )?);
        details.set_control(checked("control", crafter.control, AttributeStore::CONTROL_MAX)?);
        let cp = checked("cp", crafter.cp, AttributeStore::CP_MAX)?;
        details.set_cp(cp);
        details.set_max_cp(cp);
        details.set_crafter_level(checked(
            "crafter_level",
            crafter.level,
            AttributeStore::LEVEL_MAX,
        )?);

        details.set_synth_level(checked("synth_level", recipe.level, AttributeStore::LEVEL_MAX)?);
        let durability = checked(
            "durability",
            recipe.durability,
            AttributeStore::DURABILITY_MAX,
        )?;
        details.set_durability(durability);
        details.set_max_durability(durability);
        details.set_max_progress(checked(
            "max_progress",
            recipe.progress,
            AttributeStore::PROGRESS_MAX,
        )?);
        details.set_max_quality(checked(
            "max_quality",
            recipe.quality,
            AttributeStore::QUALITY_MAX,
        )?);
        details.set_condition(Condition::Normal);

        Ok(Self {
            details,
            step: SynthConfig::FIRST_STEP,
            previous: None,
            leading_action: None,
            temp_effects: TempEffects::new(),
        })
    }

    /// Derives the state reached by performing `action` from `parent`.
    ///
    /// Copies the attribute store and temp-effect list, increments the
    /// step counter, and records the provenance link. The parent is never
    /// mutated; the action's effects are applied to the returned value.
    pub fn derive(parent: &Arc<CraftState>, action: ActionKind) -> CraftState {
        CraftState {
            details: parent.details,
            step: parent.step + 1,
            previous: Some(Arc::clone(parent)),
            leading_action: Some(action),
            temp_effects: parent.temp_effects.clone(),
        }
    }

    // ========================================================================
    // Projections
    // ========================================================================

    /// Turn counter, starting at 1 for a root state.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Ancestor this state was derived from; `None` for a root.
    pub fn previous(&self) -> Option<&Arc<CraftState>> {
        self.previous.as_ref()
    }

    /// Action that produced this state from its ancestor.
    pub fn leading_action(&self) -> Option<ActionKind> {
        self.leading_action
    }

    /// Read access to the packed attributes.
    pub fn attributes(&self) -> &AttributeStore {
        &self.details
    }

    /// Mutable access for effect operators working on a freshly derived
    /// instance. Self-mutation is fine; mutating a state another state was
    /// derived from is not, and nothing in this crate does it.
    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.details
    }

    /// Outcome classification; completion wins over a bust.
    pub fn status(&self) -> SynthesisStatus {
        if self.progress() >= self.max_progress() {
            SynthesisStatus::Completed
        } else if self.durability() == 0 {
            SynthesisStatus::Busted
        } else {
            SynthesisStatus::InProgress
        }
    }

    /// Crafter level minus recipe level, clamped to zero while an
    /// ingenuity-type buff masks the deficit.
    pub fn level_surplus(&self) -> i32 {
        let surplus = self.crafter_level() as i32 - self.synth_level() as i32;
        if self.details.ingenuity_turns() > 0 || self.details.ingenuity2_turns() > 0 {
            surplus.max(0)
        } else {
            surplus
        }
    }

    /// Deterministic SHA-256 digest of the packed attributes.
    ///
    /// Two states that are `==` produce the same digest, making it a
    /// stable key for memoization tables shared across search runs.
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for word in self.details.words() {
            hasher.update(word.to_le_bytes());
        }
        hasher.finalize().into()
    }

    // Attribute projections forwarded from the store.

    pub fn craftsmanship(&self) -> u32 {
        self.details.craftsmanship()
    }

    pub fn control(&self) -> u32 {
        self.details.control()
    }

    pub fn cp(&self) -> u32 {
        self.details.cp()
    }

    pub fn max_cp(&self) -> u32 {
        self.details.max_cp()
    }

    pub fn durability(&self) -> u32 {
        self.details.durability()
    }

    pub fn max_durability(&self) -> u32 {
        self.details.max_durability()
    }

    pub fn progress(&self) -> u32 {
        self.details.progress()
    }

    pub fn max_progress(&self) -> u32 {
        self.details.max_progress()
    }

    pub fn quality(&self) -> u32 {
        self.details.quality()
    }

    pub fn max_quality(&self) -> u32 {
        self.details.max_quality()
    }

    pub fn synth_level(&self) -> u32 {
        self.details.synth_level()
    }

    pub fn crafter_level(&self) -> u32 {
        self.details.crafter_level()
    }

    pub fn condition(&self) -> Condition {
        self.details.condition()
    }

    // ========================================================================
    // Collaborator projections
    // ========================================================================

    /// Scalar desirability of this state, per the compute collaborator.
    pub fn score(&self, env: &SynthEnv<'_>) -> f64 {
        env.compute().state_score(self)
    }

    /// Probability that the next action fails, per the collaborator.
    pub fn failure_probability(&self, env: &SynthEnv<'_>) -> f64 {
        env.compute().failure_probability(self)
    }

    pub fn success_probability(&self, env: &SynthEnv<'_>) -> f64 {
        1.0 - self.failure_probability(env)
    }

    // ========================================================================
    // Temporary enhancements
    // ========================================================================

    /// Currently tracked temporary enhancements, in application order.
    pub fn temp_effects(&self) -> &[ActionKind] {
        &self.temp_effects
    }

    /// Records a freshly applied buff. The already-active usage guard
    /// keeps duplicates out.
    pub(crate) fn track_effect(&mut self, kind: ActionKind) {
        if !self.temp_effects.contains(&kind) {
            self.temp_effects.push(kind);
        }
    }

    /// Runs the per-step decay hook for every tracked buff, in order,
    /// then drops entries whose timers reached zero.
    pub fn tick_effects(&mut self, env: &SynthEnv<'_>) {
        let tracked = self.temp_effects.clone();
        for kind in tracked {
            buff::tick(kind, self, env);
        }
        let details = self.details;
        self.temp_effects.retain(|kind| buff::is_active(*kind, &details));
    }
}

// State comparison is only concerned with the packed attributes, never
// the ancestor or the action that got us here: two different states can
// lead to the same state through different actions.
impl PartialEq for CraftState {
    fn eq(&self, other: &Self) -> bool {
        self.details == other.details
    }
}

impl Eq for CraftState {}

impl Hash for CraftState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.details.hash(state);
    }
}
