//! Gradient evaluation for [`Surface`]s.
//!
//! A surface's analytic gradient is used when it provides one. Otherwise the
//! gradient is approximated with a centered finite difference:
//!
//! ```text
//! ∂f/∂x ≈ (f(x + h, y) - f(x - h, y)) / 2h
//! ```

use descent_core::Surface;

/// Step size `h` for centered finite differences.
pub const FINITE_DIFFERENCE_STEP: f64 = 1e-5;

/// Gradient magnitudes at or below this have no meaningful direction.
pub const DIRECTION_EPSILON: f64 = 1e-4;

/// Returns the gradient of `surface` at `(x, y)`.
///
/// Uses the analytic gradient if available, otherwise [`finite_difference`].
#[must_use]
pub fn gradient<S: Surface + ?Sized>(surface: &S, x: f64, y: f64) -> [f64; 2] {
    surface
        .gradient(x, y)
        .unwrap_or_else(|| finite_difference(surface, x, y))
}

/// Approximates the gradient with a centered finite difference of step
/// [`FINITE_DIFFERENCE_STEP`], ignoring any analytic gradient.
#[must_use]
pub fn finite_difference<S: Surface + ?Sized>(surface: &S, x: f64, y: f64) -> [f64; 2] {
    let h = FINITE_DIFFERENCE_STEP;
    let gx = (surface.value(x + h, y) - surface.value(x - h, y)) / (2.0 * h);
    let gy = (surface.value(x, y + h) - surface.value(x, y - h)) / (2.0 * h);
    [gx, gy]
}

/// Euclidean norm of a gradient.
#[must_use]
pub fn magnitude(grad: [f64; 2]) -> f64 {
    grad[0].hypot(grad[1])
}

/// Unit vector pointing downhill (`-∇f`) in the `(x, y)` plane.
///
/// Falls back to `(1, 0)` when the gradient is too small to define a
/// direction.
#[must_use]
pub fn descent_direction(grad: [f64; 2]) -> [f64; 2] {
    let norm = magnitude(grad);
    if norm > DIRECTION_EPSILON {
        [-grad[0] / norm, -grad[1] / norm]
    } else {
        [1.0, 0.0]
    }
}
