//! Numerical building blocks for a gradient descent run.
//!
//! # Modules
//!
//! - [`gradient`] — analytic gradients with a centered finite-difference
//!   fallback
//! - [`optimizer`] — the SGD, Momentum, RMSProp, and Adam step rules and the
//!   per-run state they accumulate
//! - [`stopping`] — decides when a run has converged, diverged, or left the
//!   domain

pub mod gradient;
pub mod optimizer;
pub mod stopping;
