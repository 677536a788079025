//! Declarative per-action metadata.

use super::ActionKind;

/// Static configuration record for one action.
///
/// Supplied by the registry at startup and fixed thereafter. The core
/// consumes `cp_cost` and `buff_duration` and leaves discovery,
/// registration, and enable/disable policy to the caller: a disabled
/// action is filtered by the engine, never inside its own checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActionProfile {
    pub kind: ActionKind,
    /// Display name.
    pub name: &'static str,
    /// Base CP price before collaborator scaling.
    pub cp_cost: u32,
    /// Net active turns granted by one application of a buff.
    pub buff_duration: u32,
    pub enabled: bool,
}
