//! Core traits and types for the Descent framework.
//!
//! This crate defines the shared abstractions that function catalogues,
//! solvers, mesh generation, and the simulation loop build on:
//!
//! - [`Surface`] — a scalar function of two variables over a square domain
//! - [`Domain`] — the `[min, max]` range applied to both `x` and `y`
//! - [`Point3`] — a point on a surface, with `z` kept consistent with `(x, y)`
//! - [`Observer`] — receives events and optionally returns control actions

mod domain;
mod observer;
mod point;
mod surface;

pub use domain::{Domain, DomainError};
pub use observer::Observer;
pub use point::Point3;
pub use surface::Surface;
