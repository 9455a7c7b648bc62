use std::{fmt, sync::Arc};

use descent_core::{Domain, Surface};

/// Shared evaluation rule `f(x, y) -> z`.
pub type ValueFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// Shared analytic gradient rule `(x, y) -> (∂f/∂x, ∂f/∂y)`.
pub type GradientFn = Arc<dyn Fn(f64, f64) -> [f64; 2] + Send + Sync>;

/// A selectable function: identity, evaluation rule, optional analytic
/// gradient, and the domain it is viewed over.
///
/// Cloning is cheap; the rules are reference counted.
#[derive(Clone)]
pub struct FunctionDef {
    id: String,
    name: String,
    value: ValueFn,
    gradient: Option<GradientFn>,
    domain: Domain,
}

impl FunctionDef {
    /// Creates a definition without an analytic gradient.
    pub fn new<F>(id: impl Into<String>, name: impl Into<String>, domain: Domain, value: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            name: name.into(),
            value: Arc::new(value),
            gradient: None,
            domain,
        }
    }

    /// Attaches an analytic gradient rule.
    #[must_use]
    pub fn with_gradient<G>(mut self, gradient: G) -> Self
    where
        G: Fn(f64, f64) -> [f64; 2] + Send + Sync + 'static,
    {
        self.gradient = Some(Arc::new(gradient));
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name for selectors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn has_gradient(&self) -> bool {
        self.gradient.is_some()
    }
}

impl Surface for FunctionDef {
    fn value(&self, x: f64, y: f64) -> f64 {
        (self.value)(x, y)
    }

    fn gradient(&self, x: f64, y: f64) -> Option<[f64; 2]> {
        self.gradient.as_ref().map(|g| g(x, y))
    }

    fn domain(&self) -> Domain {
        self.domain
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_gradient", &self.has_gradient())
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
