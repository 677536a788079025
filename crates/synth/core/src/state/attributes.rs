//! Bit-packed storage for synthesis stats and buff timers.
//!
//! Every attribute occupies a contiguous run of bits at a fixed offset
//! inside one of three 64-bit words, so copying a whole store is three
//! register moves and equality is three integer compares. Offsets are
//! cumulative sums of the preceding field widths, computed at compile
//! time. The packing doubles as the bit-exact wire form, so fields must
//! not be reordered or resized.

use super::condition::Condition;

/// Location of one attribute inside the packed words.
#[derive(Clone, Copy, Debug)]
struct Field {
    word: usize,
    offset: u32,
    len: u32,
    name: &'static str,
}

impl Field {
    const fn first(word: usize, len: u32, name: &'static str) -> Self {
        Self {
            word,
            offset: 0,
            len,
            name,
        }
    }

    /// Next field in the same word, starting where `prev` ends.
    const fn after(prev: Field, len: u32, name: &'static str) -> Self {
        Self {
            word: prev.word,
            offset: prev.offset + prev.len,
            len,
            name,
        }
    }

    const fn end(self) -> u32 {
        self.offset + self.len
    }

    /// Largest storable value.
    const fn max(self) -> u32 {
        ((1u64 << self.len) - 1) as u32
    }
}

// ---- word 1: crafter stats and synth resources ----
const CRAFTSMANSHIP: Field = Field::first(0, 9, "craftsmanship");
const CONTROL: Field = Field::after(CRAFTSMANSHIP, 9, "control");
const CP: Field = Field::after(CONTROL, 9, "cp");
const MAX_CP: Field = Field::after(CP, 9, "max_cp");
const DURABILITY: Field = Field::after(MAX_CP, 7, "durability");
const MAX_DURABILITY: Field = Field::after(DURABILITY, 7, "max_durability");
const PROGRESS: Field = Field::after(MAX_DURABILITY, 7, "progress");
const MAX_PROGRESS: Field = Field::after(PROGRESS, 7, "max_progress");

// ---- word 2: levels, quality, condition, buff timers ----
const SYNTH_LEVEL: Field = Field::first(1, 6, "synth_level");
const QUALITY: Field = Field::after(SYNTH_LEVEL, 11, "quality");
const MAX_QUALITY: Field = Field::after(QUALITY, 11, "max_quality");
const CRAFTER_LEVEL: Field = Field::after(MAX_QUALITY, 6, "crafter_level");
const CONDITION: Field = Field::after(CRAFTER_LEVEL, 2, "condition");
const MANIPULATION: Field = Field::after(CONDITION, 3, "manipulation");
const GREAT_STRIDES: Field = Field::after(MANIPULATION, 3, "great_strides");
const INGENUITY: Field = Field::after(GREAT_STRIDES, 3, "ingenuity");
const STEADY_HAND: Field = Field::after(INGENUITY, 3, "steady_hand");
const INNER_QUIET: Field = Field::after(STEADY_HAND, 6, "inner_quiet");
const WASTE_NOT: Field = Field::after(INNER_QUIET, 3, "waste_not");
const STEADY_HAND_2: Field = Field::after(WASTE_NOT, 3, "steady_hand_2");
const INGENUITY_2: Field = Field::after(STEADY_HAND_2, 3, "ingenuity_2");

// ---- word 3: second-wave buff timers ----
const COMFORT_ZONE: Field = Field::first(2, 4, "comfort_zone");
const INNOVATION: Field = Field::after(COMFORT_ZONE, 3, "innovation");
const WASTE_NOT_2: Field = Field::after(INNOVATION, 4, "waste_not_2");

// Each word must hold its fields without spilling past 64 bits.
const _: () = assert!(MAX_PROGRESS.end() <= 64);
const _: () = assert!(INGENUITY_2.end() <= 64);
const _: () = assert!(WASTE_NOT_2.end() <= 64);

/// Fixed-size bit-packed record of every stat and buff counter.
///
/// All typed accessors are thin wrappers over [`Self::retrieve`] and
/// [`Self::assign`] bound to a fixed field descriptor. Writes that do not
/// fit the field's width panic; an oversized value means an uncapped
/// formula upstream and must never be truncated silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeStore {
    words: [u64; 3],
}

impl AttributeStore {
    /// Upper bounds for externally supplied starting values.
    pub const CRAFTSMANSHIP_MAX: u32 = CRAFTSMANSHIP.max();
    pub const CONTROL_MAX: u32 = CONTROL.max();
    pub const CP_MAX: u32 = CP.max();
    pub const DURABILITY_MAX: u32 = DURABILITY.max();
    pub const PROGRESS_MAX: u32 = PROGRESS.max();
    pub const QUALITY_MAX: u32 = QUALITY.max();
    pub const LEVEL_MAX: u32 = CRAFTER_LEVEL.max();

    /// Creates an all-zero store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from its packed wire form.
    pub const fn from_words(words: [u64; 3]) -> Self {
        Self { words }
    }

    /// Packed wire form. Offsets and widths are stable across versions.
    pub const fn words(&self) -> [u64; 3] {
        self.words
    }

    fn retrieve(&self, field: Field) -> u32 {
        let mask = ((1u64 << field.len) - 1) << field.offset;
        ((self.words[field.word] & mask) >> field.offset) as u32
    }

    fn assign(&mut self, field: Field, value: u32) {
        assert!(
            (value as u64) < (1u64 << field.len),
            "{} = {} exceeds its {}-bit field",
            field.name,
            value,
            field.len,
        );
        let mask = ((1u64 << field.len) - 1) << field.offset;
        let word = &mut self.words[field.word];
        *word &= !mask;
        *word |= (value as u64) << field.offset;
    }

    // ========================================================================
    // Crafter stats and synth resources
    // ========================================================================

    pub fn craftsmanship(&self) -> u32 {
        self.retrieve(CRAFTSMANSHIP)
    }

    pub fn set_craftsmanship(&mut self, value: u32) {
        self.assign(CRAFTSMANSHIP, value);
    }

    pub fn control(&self) -> u32 {
        self.retrieve(CONTROL)
    }

    pub fn set_control(&mut self, value: u32) {
        self.assign(CONTROL, value);
    }

    pub fn cp(&self) -> u32 {
        self.retrieve(CP)
    }

    pub fn set_cp(&mut self, value: u32) {
        self.assign(CP, value);
    }

    pub fn max_cp(&self) -> u32 {
        self.retrieve(MAX_CP)
    }

    pub fn set_max_cp(&mut self, value: u32) {
        self.assign(MAX_CP, value);
    }

    pub fn durability(&self) -> u32 {
        self.retrieve(DURABILITY)
    }

    pub fn set_durability(&mut self, value: u32) {
        self.assign(DURABILITY, value);
    }

    pub fn max_durability(&self) -> u32 {
        self.retrieve(MAX_DURABILITY)
    }

    pub fn set_max_durability(&mut self, value: u32) {
        self.assign(MAX_DURABILITY, value);
    }

    pub fn progress(&self) -> u32 {
        self.retrieve(PROGRESS)
    }

    pub fn set_progress(&mut self, value: u32) {
        self.assign(PROGRESS, value);
    }

    pub fn max_progress(&self) -> u32 {
        self.retrieve(MAX_PROGRESS)
    }

    pub fn set_max_progress(&mut self, value: u32) {
        self.assign(MAX_PROGRESS, value);
    }

    // ========================================================================
    // Levels, quality, condition
    // ========================================================================

    pub fn synth_level(&self) -> u32 {
        self.retrieve(SYNTH_LEVEL)
    }

    pub fn set_synth_level(&mut self, value: u32) {
        self.assign(SYNTH_LEVEL, value);
    }

    pub fn crafter_level(&self) -> u32 {
        self.retrieve(CRAFTER_LEVEL)
    }

    pub fn set_crafter_level(&mut self, value: u32) {
        self.assign(CRAFTER_LEVEL, value);
    }

    pub fn quality(&self) -> u32 {
        self.retrieve(QUALITY)
    }

    pub fn set_quality(&mut self, value: u32) {
        self.assign(QUALITY, value);
    }

    pub fn max_quality(&self) -> u32 {
        self.retrieve(MAX_QUALITY)
    }

    pub fn set_max_quality(&mut self, value: u32) {
        self.assign(MAX_QUALITY, value);
    }

    pub fn condition(&self) -> Condition {
        Condition::from_bits(self.retrieve(CONDITION))
    }

    pub fn set_condition(&mut self, condition: Condition) {
        self.assign(CONDITION, condition.bits());
    }

    // ========================================================================
    // Buff timers
    // ========================================================================

    pub fn manipulation_turns(&self) -> u32 {
        self.retrieve(MANIPULATION)
    }

    pub fn set_manipulation_turns(&mut self, turns: u32) {
        self.assign(MANIPULATION, turns);
    }

    pub fn great_strides_turns(&self) -> u32 {
        self.retrieve(GREAT_STRIDES)
    }

    pub fn set_great_strides_turns(&mut self, turns: u32) {
        self.assign(GREAT_STRIDES, turns);
    }

    pub fn ingenuity_turns(&self) -> u32 {
        self.retrieve(INGENUITY)
    }

    pub fn set_ingenuity_turns(&mut self, turns: u32) {
        self.assign(INGENUITY, turns);
    }

    pub fn steady_hand_turns(&self) -> u32 {
        self.retrieve(STEADY_HAND)
    }

    pub fn set_steady_hand_turns(&mut self, turns: u32) {
        self.assign(STEADY_HAND, turns);
    }

    pub fn waste_not_turns(&self) -> u32 {
        self.retrieve(WASTE_NOT)
    }

    pub fn set_waste_not_turns(&mut self, turns: u32) {
        self.assign(WASTE_NOT, turns);
    }

    pub fn steady_hand2_turns(&self) -> u32 {
        self.retrieve(STEADY_HAND_2)
    }

    pub fn set_steady_hand2_turns(&mut self, turns: u32) {
        self.assign(STEADY_HAND_2, turns);
    }

    pub fn ingenuity2_turns(&self) -> u32 {
        self.retrieve(INGENUITY_2)
    }

    pub fn set_ingenuity2_turns(&mut self, turns: u32) {
        self.assign(INGENUITY_2, turns);
    }

    pub fn comfort_zone_turns(&self) -> u32 {
        self.retrieve(COMFORT_ZONE)
    }

    pub fn set_comfort_zone_turns(&mut self, turns: u32) {
        self.assign(COMFORT_ZONE, turns);
    }

    pub fn innovation_turns(&self) -> u32 {
        self.retrieve(INNOVATION)
    }

    pub fn set_innovation_turns(&mut self, turns: u32) {
        self.assign(INNOVATION, turns);
    }

    pub fn waste_not2_turns(&self) -> u32 {
        self.retrieve(WASTE_NOT_2)
    }

    pub fn set_waste_not2_turns(&mut self, turns: u32) {
        self.assign(WASTE_NOT_2, turns);
    }

    // ========================================================================
    // Inner Quiet composite field
    // ========================================================================
    // The 6-bit Inner Quiet field layers a 5-bit stack count over an
    // active flag in bit 0. The two halves are independently settable.

    fn inner_quiet_value(&self) -> u32 {
        self.retrieve(INNER_QUIET)
    }

    fn set_inner_quiet_value(&mut self, value: u32) {
        self.assign(INNER_QUIET, value);
    }

    pub fn inner_quiet_stacks(&self) -> u32 {
        self.inner_quiet_value() >> 1
    }

    /// Writes the stack count, preserving the active flag.
    pub fn set_inner_quiet_stacks(&mut self, stacks: u32) {
        let flag = self.inner_quiet_value() & 0x1;
        self.set_inner_quiet_value(flag | (stacks << 1));
    }

    pub fn inner_quiet_active(&self) -> bool {
        self.inner_quiet_value() & 0x1 == 1
    }

    /// Writes the active flag, preserving the stack count.
    pub fn set_inner_quiet_active(&mut self, active: bool) {
        let stacks = self.inner_quiet_value() & !0x1;
        self.set_inner_quiet_value(stacks | active as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_round_trips_at_its_maximum() {
        let mut store = AttributeStore::new();

        store.set_craftsmanship(511);
        store.set_control(511);
        store.set_cp(511);
        store.set_max_cp(511);
        store.set_durability(127);
        store.set_max_durability(127);
        store.set_progress(127);
        store.set_max_progress(127);
        store.set_synth_level(63);
        store.set_quality(2047);
        store.set_max_quality(2047);
        store.set_crafter_level(63);
        store.set_condition(Condition::Poor);
        store.set_manipulation_turns(7);
        store.set_great_strides_turns(7);
        store.set_ingenuity_turns(7);
        store.set_steady_hand_turns(7);
        store.set_inner_quiet_stacks(31);
        store.set_inner_quiet_active(true);
        store.set_waste_not_turns(7);
        store.set_steady_hand2_turns(7);
        store.set_ingenuity2_turns(7);
        store.set_comfort_zone_turns(15);
        store.set_innovation_turns(7);
        store.set_waste_not2_turns(15);

        // Reading back after every write proves the runs do not overlap.
        assert_eq!(store.craftsmanship(), 511);
        assert_eq!(store.control(), 511);
        assert_eq!(store.cp(), 511);
        assert_eq!(store.max_cp(), 511);
        assert_eq!(store.durability(), 127);
        assert_eq!(store.max_durability(), 127);
        assert_eq!(store.progress(), 127);
        assert_eq!(store.max_progress(), 127);
        assert_eq!(store.synth_level(), 63);
        assert_eq!(store.quality(), 2047);
        assert_eq!(store.max_quality(), 2047);
        assert_eq!(store.crafter_level(), 63);
        assert_eq!(store.condition(), Condition::Poor);
        assert_eq!(store.manipulation_turns(), 7);
        assert_eq!(store.great_strides_turns(), 7);
        assert_eq!(store.ingenuity_turns(), 7);
        assert_eq!(store.steady_hand_turns(), 7);
        assert_eq!(store.inner_quiet_stacks(), 31);
        assert!(store.inner_quiet_active());
        assert_eq!(store.waste_not_turns(), 7);
        assert_eq!(store.steady_hand2_turns(), 7);
        assert_eq!(store.ingenuity2_turns(), 7);
        assert_eq!(store.comfort_zone_turns(), 15);
        assert_eq!(store.innovation_turns(), 7);
        assert_eq!(store.waste_not2_turns(), 15);
    }

    #[test]
    fn overwriting_clears_the_old_value_first() {
        let mut store = AttributeStore::new();
        store.set_quality(2047);
        store.set_quality(5);
        assert_eq!(store.quality(), 5);
        assert_eq!(store.synth_level(), 0);
        assert_eq!(store.max_quality(), 0);
    }

    #[test]
    #[should_panic(expected = "durability = 128 exceeds its 7-bit field")]
    fn oversized_durability_write_panics() {
        AttributeStore::new().set_durability(128);
    }

    #[test]
    #[should_panic(expected = "quality = 2048 exceeds its 11-bit field")]
    fn oversized_quality_write_panics() {
        AttributeStore::new().set_quality(2048);
    }

    #[test]
    #[should_panic(expected = "steady_hand = 8 exceeds its 3-bit field")]
    fn oversized_timer_write_panics() {
        AttributeStore::new().set_steady_hand_turns(8);
    }

    #[test]
    fn inner_quiet_stacks_and_flag_are_independent() {
        let mut a = AttributeStore::new();
        a.set_inner_quiet_stacks(5);
        a.set_inner_quiet_active(true);

        let mut b = AttributeStore::new();
        b.set_inner_quiet_active(true);
        b.set_inner_quiet_stacks(5);

        for store in [a, b] {
            assert_eq!(store.inner_quiet_stacks(), 5);
            assert!(store.inner_quiet_active());
        }

        a.set_inner_quiet_active(false);
        assert_eq!(a.inner_quiet_stacks(), 5);
        a.set_inner_quiet_stacks(0);
        assert!(!a.inner_quiet_active());
    }

    #[test]
    fn packed_words_round_trip() {
        let mut store = AttributeStore::new();
        store.set_craftsmanship(432);
        store.set_quality(1200);
        store.set_waste_not2_turns(9);

        let copy = AttributeStore::from_words(store.words());
        assert_eq!(copy, store);
        assert_eq!(copy.craftsmanship(), 432);
        assert_eq!(copy.quality(), 1200);
        assert_eq!(copy.waste_not2_turns(), 9);
    }
}
