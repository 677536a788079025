//! Declarative action catalog oracle.

use crate::action::{ActionKind, ActionProfile};

/// Oracle providing the startup-fixed action catalog.
///
/// Profiles carry name, CP price, buff duration, and the enabled flag for
/// each action kind. The registry behind this trait is external; the core
/// performs no discovery of its own.
pub trait TablesOracle: Send + Sync {
    /// Returns the profile for a given action kind.
    fn action_profile(&self, kind: ActionKind) -> ActionProfile;
}

/// Built-in catalog carrying the default tuning values.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticTables;

impl StaticTables {
    pub const fn new() -> Self {
        Self
    }
}

impl TablesOracle for StaticTables {
    fn action_profile(&self, kind: ActionKind) -> ActionProfile {
        match kind {
            ActionKind::SteadyHand => ActionProfile {
                kind,
                name: "Steady Hand",
                cp_cost: 22,
                buff_duration: 5,
                enabled: true,
            },
            ActionKind::InnerQuiet => ActionProfile {
                kind,
                name: "Inner Quiet",
                cp_cost: 18,
                buff_duration: 0,
                enabled: false,
            },
            ActionKind::Manipulation => ActionProfile {
                kind,
                name: "Manipulation",
                cp_cost: 88,
                buff_duration: 3,
                enabled: true,
            },
            ActionKind::Ingenuity => ActionProfile {
                kind,
                name: "Ingenuity",
                cp_cost: 24,
                buff_duration: 3,
                enabled: true,
            },
            ActionKind::GreatStrides => ActionProfile {
                kind,
                name: "Great Strides",
                cp_cost: 32,
                buff_duration: 3,
                enabled: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_a_profile() {
        let tables = StaticTables::new();
        for kind in ActionKind::iter() {
            let profile = tables.action_profile(kind);
            assert_eq!(profile.kind, kind);
            assert!(!profile.name.is_empty());
        }
    }

    #[test]
    fn inner_quiet_ships_disabled() {
        assert!(!StaticTables::new().action_profile(ActionKind::InnerQuiet).enabled);
    }
}
