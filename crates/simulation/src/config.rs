use std::time::Duration;

use descent_functions::builtin;
use descent_solvers::{
    optimizer::{OptimizerKind, Params},
    stopping::StoppingPolicy,
};
use thiserror::Error;

/// Smallest learning rate a simulation accepts.
pub const MIN_LEARNING_RATE: f64 = 0.001;

/// Largest learning rate a simulation accepts.
pub const MAX_LEARNING_RATE: f64 = 0.5;

/// Shortest tick interval a simulation accepts.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Longest tick interval a simulation accepts.
pub const MAX_INTERVAL: Duration = Duration::from_millis(500);

/// Configuration for a [`Simulation`](crate::Simulation).
///
/// Build from [`Config::default`] and the `with_*` methods. The function id
/// is checked against the registry when the simulation is created.
/// Deserialization applies the same range checks as the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawConfig")
)]
pub struct Config {
    learning_rate: f64,
    interval: Duration,
    start: [f64; 2],
    resolution: u32,
    function: String,
    optimizer: OptimizerKind,
    params: Params,
    policy: StoppingPolicy,
}

/// Errors that can occur when validating a simulation config.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("learning rate {0} is outside [0.001, 0.5]")]
    LearningRate(f64),

    #[error("tick interval {0:?} is outside [10ms, 500ms]")]
    Interval(Duration),

    #[error("start point must be finite")]
    Start,

    #[error("mesh resolution must be at least 1")]
    Resolution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            interval: Duration::from_millis(100),
            start: [1.5, 1.5],
            resolution: 100,
            function: builtin::QUADRATIC.to_owned(),
            optimizer: OptimizerKind::default(),
            params: Params::default(),
            policy: StoppingPolicy::default(),
        }
    }
}

impl Config {
    /// Sets the learning rate.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is outside
    /// [`MIN_LEARNING_RATE`]..=[`MAX_LEARNING_RATE`] or not finite.
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Result<Self, ConfigError> {
        if !(MIN_LEARNING_RATE..=MAX_LEARNING_RATE).contains(&learning_rate) {
            return Err(ConfigError::LearningRate(learning_rate));
        }
        self.learning_rate = learning_rate;
        Ok(self)
    }

    /// Sets the tick interval.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is outside
    /// [`MIN_INTERVAL`]..=[`MAX_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if !(MIN_INTERVAL..=MAX_INTERVAL).contains(&interval) {
            return Err(ConfigError::Interval(interval));
        }
        self.interval = interval;
        Ok(self)
    }

    /// Sets the point runs start from after a reset or function change.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite.
    pub fn with_start(mut self, x: f64, y: f64) -> Result<Self, ConfigError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::Start);
        }
        self.start = [x, y];
        Ok(self)
    }

    /// Sets the number of mesh cells along each axis.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is zero.
    pub fn with_resolution(mut self, resolution: u32) -> Result<Self, ConfigError> {
        if resolution == 0 {
            return Err(ConfigError::Resolution);
        }
        self.resolution = resolution;
        Ok(self)
    }

    /// Sets the function selected when the simulation is created.
    #[must_use]
    pub fn with_function(mut self, id: impl Into<String>) -> Self {
        self.function = id.into();
        self
    }

    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: StoppingPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn start(&self) -> [f64; 2] {
        self.start
    }

    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Returns the id of the initially selected function.
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    #[must_use]
    pub fn optimizer(&self) -> OptimizerKind {
        self.optimizer
    }

    #[must_use]
    pub fn params(&self) -> Params {
        self.params
    }

    #[must_use]
    pub fn policy(&self) -> &StoppingPolicy {
        &self.policy
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    learning_rate: f64,
    interval: Duration,
    start: [f64; 2],
    resolution: u32,
    function: String,
    optimizer: OptimizerKind,
    params: Params,
    policy: StoppingPolicy,
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let [x, y] = raw.start;
        Ok(Config::default()
            .with_learning_rate(raw.learning_rate)?
            .with_interval(raw.interval)?
            .with_start(x, y)?
            .with_resolution(raw.resolution)?
            .with_function(raw.function)
            .with_optimizer(raw.optimizer)
            .with_params(raw.params)
            .with_policy(raw.policy))
    }
}
