use thiserror::Error;

/// Tunable parameters shared by the optimizer kinds.
///
/// - `momentum` — Momentum's decay, and Adam's β₁
/// - `beta2` — RMSProp's and Adam's squared-gradient decay
/// - `epsilon` — RMSProp's and Adam's denominator guard
///
/// SGD ignores all three.
///
/// Deserialization validates through [`Params::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawParams")
)]
pub struct Params {
    momentum: f64,
    beta2: f64,
    epsilon: f64,
}

/// Errors that can occur when validating optimizer parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParamsError {
    #[error("momentum must be finite and in [0, 1)")]
    Momentum,

    #[error("beta2 must be finite and in [0, 1)")]
    Beta2,

    #[error("epsilon must be finite and positive")]
    Epsilon,
}

impl Default for Params {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(0.9, 0.999, 1e-8).unwrap()
    }
}

impl Params {
    /// Creates validated parameters.
    ///
    /// Decay rates are restricted to `[0, 1)` so that Adam's bias-correction
    /// denominators `1 - βᵗ` never reach zero.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range or non-finite.
    pub fn new(momentum: f64, beta2: f64, epsilon: f64) -> Result<Self, ParamsError> {
        if !is_decay(momentum) {
            return Err(ParamsError::Momentum);
        }
        if !is_decay(beta2) {
            return Err(ParamsError::Beta2);
        }
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ParamsError::Epsilon);
        }

        Ok(Self {
            momentum,
            beta2,
            epsilon,
        })
    }

    /// Returns a copy with a new `momentum`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Momentum`] if the value is out of range.
    pub fn with_momentum(self, momentum: f64) -> Result<Self, ParamsError> {
        Self::new(momentum, self.beta2, self.epsilon)
    }

    /// Returns a copy with a new `beta2`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Beta2`] if the value is out of range.
    pub fn with_beta2(self, beta2: f64) -> Result<Self, ParamsError> {
        Self::new(self.momentum, beta2, self.epsilon)
    }

    /// Returns a copy with a new `epsilon`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Epsilon`] if the value is not positive.
    pub fn with_epsilon(self, epsilon: f64) -> Result<Self, ParamsError> {
        Self::new(self.momentum, self.beta2, epsilon)
    }

    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    #[must_use]
    pub fn beta2(&self) -> f64 {
        self.beta2
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawParams {
    momentum: f64,
    beta2: f64,
    epsilon: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawParams> for Params {
    type Error = ParamsError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        Self::new(raw.momentum, raw.beta2, raw.epsilon)
    }
}

fn is_decay(value: f64) -> bool {
    (0.0..1.0).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Params::default();
        assert_eq!(params.momentum(), 0.9);
        assert_eq!(params.beta2(), 0.999);
        assert_eq!(params.epsilon(), 1e-8);
    }

    #[test]
    fn rejects_decay_of_one() {
        assert_eq!(Params::new(1.0, 0.999, 1e-8), Err(ParamsError::Momentum));
        assert_eq!(Params::new(0.9, 1.0, 1e-8), Err(ParamsError::Beta2));
    }

    #[test]
    fn rejects_bad_epsilon() {
        assert_eq!(Params::new(0.9, 0.999, 0.0), Err(ParamsError::Epsilon));
        assert_eq!(Params::new(0.9, 0.999, f64::NAN), Err(ParamsError::Epsilon));
    }

    #[test]
    fn partial_updates_keep_other_fields() {
        let params = Params::default().with_beta2(0.9).unwrap();
        assert_eq!(params.momentum(), 0.9);
        assert_eq!(params.beta2(), 0.9);

        assert_eq!(
            Params::default().with_momentum(-0.1),
            Err(ParamsError::Momentum)
        );
    }
}
