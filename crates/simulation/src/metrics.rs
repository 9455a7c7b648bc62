/// Readouts for the current point of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    /// The function value `f(x, y)`.
    pub value: f64,

    /// The gradient magnitude `|∇f(x, y)|`.
    ///
    /// Zero until the first tick of a run evaluates it.
    pub gradient_magnitude: f64,
}

impl Metrics {
    /// Metrics for a point that has not been ticked yet.
    #[must_use]
    pub fn at_rest(value: f64) -> Self {
        Self {
            value,
            gradient_magnitude: 0.0,
        }
    }
}
