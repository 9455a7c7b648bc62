use descent_core::Point3;
use descent_solvers::stopping::StoppingReason;

use crate::Metrics;

/// Events emitted once per tick of a running simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The optimizer moved the point.
    Stepped {
        /// Steps taken in this run, including this one.
        step: u32,

        /// The point the gradient was evaluated at.
        from: Point3,

        /// The new current point.
        to: Point3,

        /// The gradient at `from`.
        gradient: [f64; 2],

        /// Metrics at `from`.
        metrics: Metrics,
    },

    /// The stopping policy halted the run without moving the point.
    Stopped {
        /// The point the run halted at.
        point: Point3,

        /// Metrics at `point`.
        metrics: Metrics,

        reason: StoppingReason,
    },
}

impl Event {
    /// Metrics at the point the tick evaluated.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        match self {
            Self::Stepped { metrics, .. } | Self::Stopped { metrics, .. } => *metrics,
        }
    }

    /// The current point once the tick has finished.
    #[must_use]
    pub fn point(&self) -> Point3 {
        match self {
            Self::Stepped { to, .. } => *to,
            Self::Stopped { point, .. } => *point,
        }
    }

    /// The reason the run stopped, if this tick stopped it.
    #[must_use]
    pub fn stopping_reason(&self) -> Option<StoppingReason> {
        match self {
            Self::Stepped { .. } => None,
            Self::Stopped { reason, .. } => Some(*reason),
        }
    }
}
