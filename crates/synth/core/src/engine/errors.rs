//! Action execution errors.

use crate::action::ActionKind;

/// Errors surfaced by [`super::SynthEngine::execute`].
///
/// Both variants are ordinary, recoverable outcomes for a search driver
/// probing the transition graph; neither indicates a bug.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    /// The catalog marks this action disabled.
    #[error("action {0} is disabled")]
    Disabled(ActionKind),

    /// At least one usage check rejected the action for this state.
    #[error("action {0} is not usable in this state")]
    NotUsable(ActionKind),
}
