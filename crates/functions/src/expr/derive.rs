use std::f64::consts::LN_10;

use super::{Expr, Func, Var};

/// Differentiates `expr` with respect to `var`.
///
/// The result is lightly simplified: constant subtrees are folded and the
/// `0` and `1` identities are applied, so `d/dx (3 * y)` is `0` rather than a
/// tree of zeros.
#[must_use]
pub fn derivative(expr: &Expr, var: Var) -> Expr {
    if !expr.depends_on(var) {
        return Expr::Num(0.0);
    }

    match expr {
        Expr::Num(_) => Expr::Num(0.0),
        Expr::Var(v) => Expr::Num(if *v == var { 1.0 } else { 0.0 }),
        Expr::Neg(a) => neg(derivative(a, var)),
        Expr::Add(a, b) => add(derivative(a, var), derivative(b, var)),
        Expr::Sub(a, b) => sub(derivative(a, var), derivative(b, var)),
        Expr::Mul(a, b) => add(
            mul(derivative(a, var), (**b).clone()),
            mul((**a).clone(), derivative(b, var)),
        ),
        Expr::Div(a, b) => div(
            sub(
                mul(derivative(a, var), (**b).clone()),
                mul((**a).clone(), derivative(b, var)),
            ),
            pow((**b).clone(), Expr::Num(2.0)),
        ),
        Expr::Pow(a, b) => power_rule(a, b, var),
        Expr::Call(func, a) => mul(outer_derivative(*func, a), derivative(a, var)),
    }
}

/// `d/dv a^b` for the three cases of which side depends on `v`.
fn power_rule(a: &Expr, b: &Expr, var: Var) -> Expr {
    let base = a.clone();
    let exponent = b.clone();

    if !b.depends_on(var) {
        // b a^(b-1) a'
        let lowered = sub(exponent.clone(), Expr::Num(1.0));
        return mul(mul(exponent, pow(base, lowered)), derivative(a, var));
    }

    if !a.depends_on(var) {
        // a^b ln(a) b'
        let ln_a = call(Func::Log, base.clone());
        return mul(mul(pow(base, exponent), ln_a), derivative(b, var));
    }

    // a^b (b' ln(a) + b a' / a)
    let ln_a = call(Func::Log, base.clone());
    let inner = add(
        mul(derivative(b, var), ln_a),
        div(mul(exponent.clone(), derivative(a, var)), base.clone()),
    );
    mul(pow(base, exponent), inner)
}

/// `f'(u)` for a named function `f`.
fn outer_derivative(func: Func, u: &Expr) -> Expr {
    let u = u.clone();
    let one = || Expr::Num(1.0);
    let square = |e: Expr| pow(e, Expr::Num(2.0));

    match func {
        Func::Sin => call(Func::Cos, u),
        Func::Cos => neg(call(Func::Sin, u)),
        Func::Tan => div(one(), square(call(Func::Cos, u))),
        Func::Asin => div(one(), call(Func::Sqrt, sub(one(), square(u)))),
        Func::Acos => neg(div(one(), call(Func::Sqrt, sub(one(), square(u))))),
        Func::Atan => div(one(), add(one(), square(u))),
        Func::Sinh => call(Func::Cosh, u),
        Func::Cosh => call(Func::Sinh, u),
        Func::Tanh => div(one(), square(call(Func::Cosh, u))),
        Func::Exp => call(Func::Exp, u),
        Func::Log => div(one(), u),
        Func::Log10 => div(one(), mul(u, Expr::Num(LN_10))),
        Func::Sqrt => div(one(), mul(Expr::Num(2.0), call(Func::Sqrt, u))),
        Func::Abs => div(u.clone(), call(Func::Abs, u)),
    }
}

// --- Simplifying constructors ---

fn is(expr: &Expr, value: f64) -> bool {
    matches!(expr, Expr::Num(n) if *n == value)
}

fn neg(a: Expr) -> Expr {
    match a {
        Expr::Num(n) => Expr::Num(-n),
        Expr::Neg(inner) => *inner,
        a => Expr::Neg(Box::new(a)),
    }
}

fn add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Num(x), Expr::Num(y)) => Expr::Num(x + y),
        (a, b) if is(&a, 0.0) => b,
        (a, b) if is(&b, 0.0) => a,
        (a, b) => Expr::Add(Box::new(a), Box::new(b)),
    }
}

fn sub(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Num(x), Expr::Num(y)) => Expr::Num(x - y),
        (a, b) if is(&b, 0.0) => a,
        (a, b) if is(&a, 0.0) => neg(b),
        (a, b) => Expr::Sub(Box::new(a), Box::new(b)),
    }
}

fn mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Num(x), Expr::Num(y)) => Expr::Num(x * y),
        (a, b) if is(&a, 0.0) || is(&b, 0.0) => Expr::Num(0.0),
        (a, b) if is(&a, 1.0) => b,
        (a, b) if is(&b, 1.0) => a,
        (a, b) if is(&a, -1.0) => neg(b),
        (a, b) if is(&b, -1.0) => neg(a),
        (a, b) => Expr::Mul(Box::new(a), Box::new(b)),
    }
}

fn div(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (a, b) if is(&b, 1.0) => a,
        (a, b) => Expr::Div(Box::new(a), Box::new(b)),
    }
}

fn pow(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (_, b) if is(&b, 0.0) => Expr::Num(1.0),
        (a, b) if is(&b, 1.0) => a,
        (a, b) => Expr::Pow(Box::new(a), Box::new(b)),
    }
}

fn call(func: Func, a: Expr) -> Expr {
    Expr::Call(func, Box::new(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::parser::parse;

    fn d(source: &str, var: Var) -> Expr {
        derivative(&parse(source).unwrap(), var)
    }

    /// Compares a symbolic derivative against a central difference.
    fn check(source: &str, points: &[(f64, f64)]) {
        let expr = parse(source).unwrap();
        let dx = derivative(&expr, Var::X);
        let dy = derivative(&expr, Var::Y);
        let h = 1e-6;
        for &(x, y) in points {
            let fd_x = (expr.eval(x + h, y) - expr.eval(x - h, y)) / (2.0 * h);
            let fd_y = (expr.eval(x, y + h) - expr.eval(x, y - h)) / (2.0 * h);
            assert_relative_eq!(dx.eval(x, y), fd_x, epsilon = 1e-5, max_relative = 1e-5);
            assert_relative_eq!(dy.eval(x, y), fd_y, epsilon = 1e-5, max_relative = 1e-5);
        }
    }

    const POINTS: [(f64, f64); 3] = [(0.3, 0.4), (1.2, -0.7), (-0.5, 0.9)];

    #[test]
    fn constants_differentiate_to_zero() {
        assert_eq!(d("3 * y + pi", Var::X), Expr::Num(0.0));
        assert_eq!(d("42", Var::Y), Expr::Num(0.0));
    }

    #[test]
    fn quadratic_bowl_simplifies() {
        assert_eq!(
            d("x^2 + y^2", Var::X),
            Expr::Mul(Box::new(Expr::Num(2.0)), Box::new(Expr::Var(Var::X)))
        );
    }

    #[test]
    fn linear_term_is_its_coefficient() {
        assert_eq!(d("5x - y", Var::X), Expr::Num(5.0));
        assert_eq!(d("5x - y", Var::Y), Expr::Num(-1.0));
    }

    #[test]
    fn polynomial_and_rational_terms() {
        check("x^3 - 3 x y^2 + 4", &POINTS);
        check("(x + 1) / (y^2 + 1)", &POINTS);
    }

    #[test]
    fn trigonometric_and_hyperbolic() {
        check("sin(x) * cos(y)", &POINTS);
        check("tan(x y) + atan(x - y)", &POINTS);
        check("asin(x / 2) + acos(y / 2)", &POINTS);
        check("sinh(x) + cosh(y) + tanh(x y)", &POINTS);
    }

    #[test]
    fn exponential_and_logarithmic() {
        check("exp(-(x^2 + y^2))", &POINTS);
        check("log(x^2 + y^2 + 1) + log10(2 + y)", &POINTS);
        check("sqrt(x^2 + y^2 + 1)", &POINTS);
        check("abs(x) + abs(y)", &POINTS);
    }

    #[test]
    fn general_power_rule() {
        check("2^x + y^y", &[(0.3, 0.4), (1.2, 0.7), (-0.5, 1.9)]);
        check("(x^2 + 1)^(y + 1)", &POINTS);
    }
}
