//! Compiles user-supplied expressions into evaluable surfaces.
//!
//! An expression is infix text over `x` and `y`, e.g. `x^2 + 3 sin(y)`.
//! [`Expression::parse`] builds an expression tree together with its two
//! partial derivatives, obtained by symbolic differentiation.
//!
//! # Failure policy
//!
//! The interactive loop must never be left without a usable function, so
//! [`compile`] never fails:
//!
//! - Text that does not parse yields the `fallback` definition unchanged.
//! - A NaN evaluation at a particular point yields `0` for the value and
//!   `(0, 0)` for the gradient at that point only. Infinities pass through.
//!
//! Both cases are reported through the `log` facade at `warn` level.
//! Callers that want the typed error use [`Expression::parse`] directly.

mod ast;
mod derive;
mod error;
mod lexer;
mod parser;


pub use ast::{Expr, Func, Var};
pub use derive::derivative;
pub use error::{EvalError, ParseError};
pub use parser::MAX_DEPTH;

use crate::{FunctionDef, builtin};

/// A parsed expression and its symbolic partial derivatives.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    tree: Expr,
    dx: Expr,
    dy: Expr,
}

impl Expression {
    /// Parses `source` and differentiates it with respect to `x` and `y`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is empty, malformed, nests deeper
    /// than [`MAX_DEPTH`], or references an identifier other than `x`, `y`,
    /// `pi`, `e`, or a supported function.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let tree = parser::parse(source)?;
        let dx = derivative(&tree, Var::X);
        let dy = derivative(&tree, Var::Y);
        Ok(Self {
            source: source.to_owned(),
            tree,
            dx,
            dy,
        })
    }

    /// The text this expression was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// The symbolic partial derivative with respect to `var`.
    #[must_use]
    pub fn partial(&self, var: Var) -> &Expr {
        match var {
            Var::X => &self.dx,
            Var::Y => &self.dy,
        }
    }

    /// Evaluates the expression at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NotANumber`] if the result is NaN.
    pub fn evaluate(&self, x: f64, y: f64) -> Result<f64, EvalError> {
        let value = self.tree.eval(x, y);
        if value.is_nan() {
            return Err(EvalError::NotANumber { x, y });
        }
        Ok(value)
    }

    /// Evaluates both partial derivatives at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NotANumber`] if either partial is NaN.
    pub fn gradient(&self, x: f64, y: f64) -> Result<[f64; 2], EvalError> {
        let gx = self.dx.eval(x, y);
        let gy = self.dy.eval(x, y);
        if gx.is_nan() || gy.is_nan() {
            return Err(EvalError::NotANumber { x, y });
        }
        Ok([gx, gy])
    }

    /// Wraps the expression as the `custom` [`FunctionDef`].
    ///
    /// Evaluation failures degrade to `0` and `(0, 0)`.
    #[must_use]
    pub fn into_function(self) -> FunctionDef {
        let expression = std::sync::Arc::new(self);
        let for_gradient = std::sync::Arc::clone(&expression);

        FunctionDef::new(
            builtin::CUSTOM,
            "Custom Function",
            builtin::custom_domain(),
            move |x, y| {
                expression.evaluate(x, y).unwrap_or_else(|err| {
                    log::warn!("custom function: {err}; using 0");
                    0.0
                })
            },
        )
        .with_gradient(move |x, y| {
            for_gradient.gradient(x, y).unwrap_or_else(|err| {
                log::warn!("custom gradient: {err}; using (0, 0)");
                [0.0, 0.0]
            })
        })
    }
}

/// Compiles `source` into the `custom` function definition.
///
/// Returns a clone of `fallback` if the text does not parse.
#[must_use]
pub fn compile(source: &str, fallback: &FunctionDef) -> FunctionDef {
    match Expression::parse(source) {
        Ok(expression) => expression.into_function(),
        Err(err) => {
            log::warn!("failed to parse custom function {source:?}: {err}");
            fallback.clone()
        }
    }
}
