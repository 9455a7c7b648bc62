//! Function catalogue for the Descent framework.
//!
//! - [`FunctionDef`] — an evaluable surface with an optional analytic gradient
//! - [`builtin`] — the fixed catalogue of classic optimization test surfaces
//! - [`expr`] — parses user text like `x^2 + sin(y)` and differentiates it
//!   symbolically
//! - [`FunctionRegistry`] — the versioned set of selectable functions,
//!   including the replaceable `custom` slot

pub mod builtin;
pub mod expr;

mod function;
mod registry;

pub use expr::{Expression, compile};
pub use function::{FunctionDef, GradientFn, ValueFn};
pub use registry::{FunctionRegistry, RegistryError};
