/// Rule constants and tunable parameters for the synthesis core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SynthConfig;

impl SynthConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on simultaneously tracked temporary enhancements.
    pub const MAX_TEMP_EFFECTS: usize = 8;

    // ===== rule constants =====
    /// Step number of a freshly constructed root state.
    pub const FIRST_STEP: u32 = 1;

    /// Durability restored by each effective Manipulation tick.
    pub const MANIPULATION_REGEN: u32 = 10;

    /// Durability above which Steady Hand wastes none of its procs on
    /// repair work.
    pub const SAFE_DURABILITY: u32 = 50;

    /// Base CP price of the cheapest durability-restoring action. Used to
    /// judge whether the crafter can afford to repair instead of buffing.
    pub const DURABILITY_RESTORE_BASE_CP: u32 = 92;
}
