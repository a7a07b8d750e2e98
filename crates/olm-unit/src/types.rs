//! Core types for olm-unit

use serde::{Deserialize, Serialize};

/// Job mode passed with every control call.
/// Supersedes any queued conflicting job for the same unit.
pub const JOB_MODE_REPLACE: &str = "replace";

/// Requests the controller can send for a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitAction {
    Start,
    Stop,
}

impl UnitAction {
    /// Action matching a desired on/off state.
    pub fn for_desired(desired: bool) -> Self {
        if desired {
            UnitAction::Start
        } else {
            UnitAction::Stop
        }
    }
}

impl std::fmt::Display for UnitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitAction::Start => write!(f, "start"),
            UnitAction::Stop => write!(f, "stop"),
        }
    }
}

/// Which service manager instance owns the unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitScope {
    /// System manager, reached over the system bus.
    #[default]
    System,
    /// Per-user manager, reached over the session bus.
    User,
}

impl UnitScope {
    /// Extra `systemctl` arguments selecting this manager.
    pub fn systemctl_args(&self) -> &'static [&'static str] {
        match self {
            UnitScope::System => &[],
            UnitScope::User => &["--user"],
        }
    }
}
