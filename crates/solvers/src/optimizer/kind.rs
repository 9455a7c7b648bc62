use std::{fmt, str::FromStr};

use thiserror::Error;

/// The available optimizer step rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptimizerKind {
    /// Plain stochastic gradient descent. Stateless.
    #[default]
    Sgd,

    /// Gradient descent with a velocity term.
    Momentum,

    /// Per-axis step scaling by a running mean of squared gradients.
    RmsProp,

    /// Bias-corrected first and second moment estimates.
    Adam,
}

/// Error returned when parsing an unknown optimizer name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown optimizer '{0}'")]
pub struct UnknownKindError(pub String);

impl OptimizerKind {
    /// All kinds, in selector order.
    pub const ALL: [Self; 4] = [Self::Sgd, Self::Momentum, Self::RmsProp, Self::Adam];

    /// The display label, e.g. `"RMSProp"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sgd => "SGD",
            Self::Momentum => "Momentum",
            Self::RmsProp => "RMSProp",
            Self::Adam => "Adam",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptimizerKind {
    type Err = UnknownKindError;

    /// Parses a label case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKindError(s.to_owned()))
    }
}
