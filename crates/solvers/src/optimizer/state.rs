use std::collections::VecDeque;

/// Number of gradient magnitudes retained by [`GradientHistory`].
pub const HISTORY_CAPACITY: usize = 10;

/// The most recent gradient magnitudes of a run, oldest first.
///
/// Holds at most [`HISTORY_CAPACITY`] samples; pushing beyond that evicts the
/// oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientHistory {
    samples: VecDeque<f64>,
}

impl GradientHistory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends a magnitude, evicting the oldest if full.
    pub fn push(&mut self, magnitude: f64) {
        if self.samples.len() == HISTORY_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(magnitude);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recent sample.
    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// The last `n` samples, oldest first, or `None` if fewer are held.
    #[must_use]
    pub fn recent(&self, n: usize) -> Option<Vec<f64>> {
        let len = self.samples.len();
        (n <= len).then(|| self.samples.range(len - n..).copied().collect())
    }

    /// Iterates samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

impl FromIterator<f64> for GradientHistory {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut history = Self::new();
        for magnitude in iter {
            history.push(magnitude);
        }
        history
    }
}

/// Mutable per-run optimizer state.
///
/// Each field is used by a subset of the kinds:
///
/// - `velocity` — Momentum
/// - `squared_grad` — RMSProp
/// - `first_moment`, `second_moment` — Adam
/// - `steps` — Adam's bias-correction exponent (advanced by every kind)
/// - `history` — the stopping policy's divergence check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunState {
    pub(super) velocity: [f64; 2],
    pub(super) squared_grad: [f64; 2],
    pub(super) first_moment: [f64; 2],
    pub(super) second_moment: [f64; 2],
    pub(super) steps: u32,
    history: GradientHistory,
}

impl RunState {
    /// Creates a zeroed state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every accumulator and empties the history.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if every accumulator is zero and the history is empty.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self == Self::new()
    }

    #[must_use]
    pub fn velocity(&self) -> [f64; 2] {
        self.velocity
    }

    #[must_use]
    pub fn squared_grad(&self) -> [f64; 2] {
        self.squared_grad
    }

    #[must_use]
    pub fn first_moment(&self) -> [f64; 2] {
        self.first_moment
    }

    #[must_use]
    pub fn second_moment(&self) -> [f64; 2] {
        self.second_moment
    }

    /// Number of steps taken since the last reset.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn history(&self) -> &GradientHistory {
        &self.history
    }

    /// Records a gradient magnitude for divergence detection.
    pub fn record_magnitude(&mut self, magnitude: f64) {
        self.history.push(magnitude);
    }
}
