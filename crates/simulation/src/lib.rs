//! The interactive gradient descent loop.
//!
//! A [`Simulation`] owns everything a run mutates: the selected function,
//! the current point and its trajectory, the optimizer's [`RunState`], the
//! latest [`Metrics`], and the run [`Status`]. It is driven one tick at a
//! time, either directly with [`Simulation::tick`] or on a schedule with
//! [`Simulation::poll`] and a [`Clock`].
//!
//! # Tick
//!
//! While running, each tick:
//!
//! 1. evaluates the gradient at the current point and updates the metrics,
//! 2. records the gradient magnitude in the run's history,
//! 3. asks the [`StoppingPolicy`] whether to halt, and if so stops with that
//!    reason and emits [`Event::Stopped`],
//! 4. otherwise applies one optimizer step, moves the point, appends it to
//!    the trajectory, and emits [`Event::Stepped`].
//!
//! The observer passed to `tick` sees every event and may return
//! [`Action::Pause`].
//!
//! # Resets
//!
//! Changing the function, recompiling the custom expression, or switching
//! optimizer discards the run state, so accumulated moments never carry over
//! into a different run.
//!
//! [`RunState`]: descent_solvers::optimizer::RunState
//! [`StoppingPolicy`]: descent_solvers::stopping::StoppingPolicy

mod action;
mod config;
mod error;
mod event;
mod metrics;
mod schedule;
mod simulation;
mod status;
mod trajectory;


pub use action::Action;
pub use config::{
    Config, ConfigError, MAX_INTERVAL, MAX_LEARNING_RATE, MIN_INTERVAL, MIN_LEARNING_RATE,
};
pub use error::SimulationError;
pub use event::Event;
pub use metrics::Metrics;
pub use schedule::{Clock, ManualClock, SystemClock, Ticker};
pub use simulation::Simulation;
pub use status::Status;
pub use trajectory::Trajectory;
