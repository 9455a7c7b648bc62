use std::fmt;

use descent_solvers::stopping::StoppingReason;

/// Where a simulation is in its run lifecycle.
///
/// - `Idle` → `Running` on start
/// - `Running` ↔ `Paused` on pause and resume
/// - `Running` → `Stopped(reason)` when the stopping policy matches
/// - `Stopped` → `Running` on start
/// - any state → `Idle` on reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped(StoppingReason),
}

impl Status {
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    /// The reason the last run halted, if it has.
    #[must_use]
    pub fn stopping_reason(self) -> Option<StoppingReason> {
        match self {
            Self::Stopped(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
            Self::Paused => f.write_str("paused"),
            Self::Stopped(reason) => write!(f, "stopped ({reason})"),
        }
    }
}
