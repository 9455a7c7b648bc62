//! Stopping conditions for a descent run.

use std::fmt;

use crate::optimizer::GradientHistory;

/// Why a run halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StoppingReason {
    /// The gradient magnitude fell below the convergence tolerance.
    Converged,

    /// The gradient magnitude grew steadily over the divergence window.
    Diverged,

    /// The point wandered too far outside the surface's domain.
    #[cfg_attr(feature = "serde", serde(rename = "bounds"))]
    OutOfBounds,
}

impl StoppingReason {
    /// The short label, e.g. `"bounds"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::Diverged => "diverged",
            Self::OutOfBounds => "bounds",
        }
    }
}

impl fmt::Display for StoppingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Thresholds that decide when a run halts.
///
/// Checks are applied in order, first match wins:
///
/// 1. [`StoppingReason::Converged`] if the gradient magnitude is below
///    `convergence_tolerance`.
/// 2. [`StoppingReason::OutOfBounds`] if `|x|` or `|y|` exceeds
///    `bounds_factor` times the domain's max.
/// 3. [`StoppingReason::Diverged`] once the history holds
///    `divergence_window` samples, if each of the last `divergence_window`
///    magnitudes exceeds `dip_tolerance` times its predecessor and the
///    newest exceeds `growth_factor` times the oldest.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingPolicy {
    pub convergence_tolerance: f64,
    pub bounds_factor: f64,
    pub divergence_window: usize,
    pub dip_tolerance: f64,
    pub growth_factor: f64,
}

impl Default for StoppingPolicy {
    fn default() -> Self {
        Self {
            convergence_tolerance: 1e-3,
            bounds_factor: 2.0,
            divergence_window: 5,
            dip_tolerance: 0.95,
            growth_factor: 1.5,
        }
    }
}

impl StoppingPolicy {
    /// Returns the reason the run should halt, or `None` to keep stepping.
    ///
    /// `history` is expected to already contain `grad_mag` as its newest
    /// sample.
    #[must_use]
    pub fn evaluate(
        &self,
        x: f64,
        y: f64,
        grad_mag: f64,
        history: &GradientHistory,
        domain_max: f64,
    ) -> Option<StoppingReason> {
        if grad_mag < self.convergence_tolerance {
            return Some(StoppingReason::Converged);
        }

        let limit = self.bounds_factor * domain_max;
        if x.abs() > limit || y.abs() > limit {
            return Some(StoppingReason::OutOfBounds);
        }

        if self.is_diverging(history) {
            return Some(StoppingReason::Diverged);
        }

        None
    }

    fn is_diverging(&self, history: &GradientHistory) -> bool {
        if self.divergence_window < 2 {
            return false;
        }
        let Some(window) = history.recent(self.divergence_window) else {
            return false;
        };

        let rising = window
            .windows(2)
            .all(|pair| pair[1] > self.dip_tolerance * pair[0]);
        let (oldest, newest) = (window[0], window[window.len() - 1]);

        rising && newest > self.growth_factor * oldest
    }
}
