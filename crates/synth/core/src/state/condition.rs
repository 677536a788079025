//! Momentary synthesis condition.

/// Situational modifier attached to each step of the synthesis.
///
/// Stored read-only by the core in a 2-bit field; its effect on quality
/// and success math is implemented by the external compute collaborator.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Condition {
    #[default]
    Normal,
    Good,
    Excellent,
    Poor,
}

impl Condition {
    /// Packed 2-bit representation.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub(crate) const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::Normal,
            1 => Self::Good,
            2 => Self::Excellent,
            _ => Self::Poor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        for condition in [
            Condition::Normal,
            Condition::Good,
            Condition::Excellent,
            Condition::Poor,
        ] {
            assert_eq!(Condition::from_bits(condition.bits()), condition);
        }
    }
}
