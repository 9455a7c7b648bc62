use crate::Domain;

/// A scalar function of two variables defined over a square domain.
///
/// Surfaces are the objective a descent run walks across. They must be
/// deterministic: the same `(x, y)` always yields the same value.
///
/// Implementors that know a closed-form derivative return it from
/// [`gradient`](Surface::gradient); others leave the default and let callers
/// fall back to a numerical approximation.
pub trait Surface {
    /// Evaluates `f(x, y)`.
    fn value(&self, x: f64, y: f64) -> f64;

    /// Returns the analytic gradient `(∂f/∂x, ∂f/∂y)` if one is available.
    fn gradient(&self, _x: f64, _y: f64) -> Option<[f64; 2]> {
        None
    }

    /// The domain the surface is meant to be viewed and sampled over.
    fn domain(&self) -> Domain;
}

impl<S: Surface + ?Sized> Surface for &S {
    fn value(&self, x: f64, y: f64) -> f64 {
        (**self).value(x, y)
    }

    fn gradient(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        (**self).gradient(x, y)
    }

    fn domain(&self) -> Domain {
        (**self).domain()
    }
}
