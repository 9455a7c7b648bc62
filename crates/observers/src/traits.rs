//! Capability traits for generic observers.
//!
//! # Event traits
//!
//! - [`HasObjective`] — events that carry the function value at the evaluated
//!   point
//! - [`HasGradientMagnitude`] — events that carry `|∇f|` at the evaluated
//!   point
//!
//! # Action traits
//!
//! - [`CanPause`] — actions that can pause the run
//!
//! # Example
//!
//! ```rust
//! use descent_core::Observer;
//! use descent_observers::traits::{CanPause, HasGradientMagnitude};
//!
//! /// Pauses once the slope flattens out, before the run converges.
//! struct PauseWhenFlat {
//!     threshold: f64,
//! }
//!
//! impl<E: HasGradientMagnitude, A: CanPause> Observer<E, A> for PauseWhenFlat {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.gradient_magnitude() < self.threshold).then(A::pause)
//!     }
//! }
//! ```

use descent_simulation::{Action, Event};

/// An event that carries an objective value.
pub trait HasObjective {
    /// The function value at the point the event evaluated.
    fn objective(&self) -> f64;
}

/// An event that carries a gradient magnitude.
pub trait HasGradientMagnitude {
    /// The gradient magnitude at the point the event evaluated.
    fn gradient_magnitude(&self) -> f64;
}

/// An action type that can pause a run.
pub trait CanPause {
    fn pause() -> Self;
}

impl HasObjective for Event {
    fn objective(&self) -> f64 {
        self.metrics().value
    }
}

impl HasGradientMagnitude for Event {
    fn gradient_magnitude(&self) -> f64 {
        self.metrics().gradient_magnitude
    }
}

impl CanPause for Action {
    fn pause() -> Self {
        Self::Pause
    }
}
