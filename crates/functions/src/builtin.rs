//! The built-in catalogue of optimization test surfaces.
//!
//! Every built-in carries a closed-form gradient. The `custom` entry is a
//! placeholder (`f ≡ 0`, no gradient) until the user supplies an expression.

use std::f64::consts::{E, PI};

use descent_core::Domain;

use crate::FunctionDef;

pub const QUADRATIC: &str = "quadratic";
pub const ROSENBROCK: &str = "rosenbrock";
pub const SADDLE: &str = "saddle";
pub const SINUSOIDAL: &str = "sinusoidal";
pub const HIMMELBLAU: &str = "himmelblau";
pub const BEALE: &str = "beale";
pub const ACKLEY: &str = "ackley";

/// Identifier of the replaceable user-expression slot.
pub const CUSTOM: &str = "custom";

/// Identifiers of the immutable built-ins, in catalogue order.
pub const IDS: [&str; 7] = [
    QUADRATIC, ROSENBROCK, SADDLE, SINUSOIDAL, HIMMELBLAU, BEALE, ACKLEY,
];

/// Half-width of the domain used for `custom` expressions.
pub const CUSTOM_HALF_WIDTH: f64 = 2.0;

/// Returns `true` if `id` names an immutable built-in.
#[must_use]
pub fn is_builtin(id: &str) -> bool {
    IDS.contains(&id)
}

/// Returns all built-ins in catalogue order.
#[must_use]
pub fn all() -> Vec<FunctionDef> {
    vec![
        quadratic(),
        rosenbrock(),
        saddle(),
        sinusoidal(),
        himmelblau(),
        beale(),
        ackley(),
    ]
}

/// The `custom` placeholder used before any expression has been compiled.
#[must_use]
pub fn custom_placeholder() -> FunctionDef {
    FunctionDef::new(CUSTOM, "Custom Function", custom_domain(), |_, _| 0.0)
}

/// The domain assigned to every `custom` definition.
#[must_use]
pub fn custom_domain() -> Domain {
    symmetric(CUSTOM_HALF_WIDTH)
}

fn symmetric(half_width: f64) -> Domain {
    // Known-good literal bounds, unwrap is safe
    Domain::symmetric(half_width).unwrap()
}

/// `x² + y²`, minimum at the origin.
#[must_use]
pub fn quadratic() -> FunctionDef {
    FunctionDef::new(QUADRATIC, "Quadratic Bowl", symmetric(2.0), |x, y| {
        x * x + y * y
    })
    .with_gradient(|x, y| [2.0 * x, 2.0 * y])
}

/// `(1 - x)² + 100 (y - x²)²`, minimum at `(1, 1)` in a narrow valley.
#[must_use]
pub fn rosenbrock() -> FunctionDef {
    FunctionDef::new(ROSENBROCK, "Rosenbrock", symmetric(2.0), |x, y| {
        (1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2)
    })
    .with_gradient(|x, y| {
        [
            -2.0 * (1.0 - x) - 400.0 * x * (y - x * x),
            200.0 * (y - x * x),
        ]
    })
}

/// `x² - y²`, a saddle at the origin with no minimum.
#[must_use]
pub fn saddle() -> FunctionDef {
    FunctionDef::new(SADDLE, "Saddle Point", symmetric(2.0), |x, y| x * x - y * y)
        .with_gradient(|x, y| [2.0 * x, -2.0 * y])
}

/// `sin(x) cos(y)`.
#[must_use]
pub fn sinusoidal() -> FunctionDef {
    FunctionDef::new(SINUSOIDAL, "Sinusoidal", symmetric(PI), |x, y| {
        x.sin() * y.cos()
    })
    .with_gradient(|x, y| [x.cos() * y.cos(), -x.sin() * y.sin()])
}

/// `(x² + y - 11)² + (x + y² - 7)²`, four equal minima.
#[must_use]
pub fn himmelblau() -> FunctionDef {
    FunctionDef::new(HIMMELBLAU, "Himmelblau", symmetric(5.0), |x, y| {
        (x * x + y - 11.0).powi(2) + (x + y * y - 7.0).powi(2)
    })
    .with_gradient(|x, y| {
        let a = x * x + y - 11.0;
        let b = x + y * y - 7.0;
        [4.0 * x * a + 2.0 * b, 2.0 * a + 4.0 * y * b]
    })
}

fn beale_terms(x: f64, y: f64) -> [f64; 3] {
    [
        1.5 - x + x * y,
        2.25 - x + x * y * y,
        2.625 - x + x * y * y * y,
    ]
}

/// Beale's function, minimum at `(3, 0.5)`.
#[must_use]
pub fn beale() -> FunctionDef {
    FunctionDef::new(BEALE, "Beale", symmetric(4.5), |x, y| {
        let [t1, t2, t3] = beale_terms(x, y);
        t1 * t1 + t2 * t2 + t3 * t3
    })
    .with_gradient(|x, y| {
        let [t1, t2, t3] = beale_terms(x, y);
        [
            2.0 * t1 * (y - 1.0) + 2.0 * t2 * (y * y - 1.0) + 2.0 * t3 * (y * y * y - 1.0),
            2.0 * t1 * x + 4.0 * t2 * x * y + 6.0 * t3 * x * y * y,
        ]
    })
}

const ACKLEY_A: f64 = 20.0;
const ACKLEY_B: f64 = 0.2;
const ACKLEY_C: f64 = 2.0 * PI;

/// Ackley's function, a global minimum at the origin among many local ones.
///
/// The analytic gradient is `0 / 0`, so NaN, at exactly `(0, 0)`. A run placed
/// there produces NaN steps that no stopping rule catches.
#[must_use]
pub fn ackley() -> FunctionDef {
    FunctionDef::new(ACKLEY, "Ackley", symmetric(5.0), |x, y| {
        let r = (0.5 * (x * x + y * y)).sqrt();
        -ACKLEY_A * (-ACKLEY_B * r).exp()
            - (0.5 * ((ACKLEY_C * x).cos() + (ACKLEY_C * y).cos())).exp()
            + ACKLEY_A
            + E
    })
    .with_gradient(|x, y| {
        let r = (0.5 * (x * x + y * y)).sqrt();
        let radial = ACKLEY_A * ACKLEY_B * (-ACKLEY_B * r).exp() / (2.0 * r);
        let wave = (0.5 * ((ACKLEY_C * x).cos() + (ACKLEY_C * y).cos())).exp();
        [
            radial * x + wave * 0.5 * (ACKLEY_C * x).sin() * ACKLEY_C,
            radial * y + wave * 0.5 * (ACKLEY_C * y).sin() * ACKLEY_C,
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use descent_core::Surface;
    use descent_solvers::gradient::finite_difference;

    /// Sample points away from the Ackley singularity at the origin.
    const SAMPLES: [(f64, f64); 5] = [
        (1.5, 1.5),
        (-0.7, 0.3),
        (0.25, -1.1),
        (1.9, -1.9),
        (-1.2, -0.4),
    ];

    #[test]
    fn catalogue_order_is_stable() {
        let ids: Vec<_> = all().iter().map(|f| f.id().to_owned()).collect();
        assert_eq!(ids, IDS);
    }

    #[test]
    fn ackley_gradient_is_undefined_at_the_origin() {
        let [gx, gy] = ackley().gradient(0.0, 0.0).unwrap();
        assert!(gx.is_nan() && gy.is_nan());
        assert_abs_diff_eq!(ackley().value(0.0, 0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn every_builtin_has_an_analytic_gradient() {
        assert!(all().iter().all(FunctionDef::has_gradient));
        assert!(!custom_placeholder().has_gradient());
    }

    #[test]
    fn analytic_gradients_match_finite_differences() {
        for def in all() {
            for (x, y) in SAMPLES {
                let analytic = def.gradient(x, y).unwrap();
                let numeric = finite_difference(&def, x, y);
                // Rosenbrock and Beale have large higher derivatives.
                let tol = 1e-4 * analytic[0].abs().max(analytic[1].abs()).max(1.0);
                assert_abs_diff_eq!(analytic[0], numeric[0], epsilon = tol);
                assert_abs_diff_eq!(analytic[1], numeric[1], epsilon = tol);
            }
        }
    }

    #[test]
    fn known_minima() {
        assert_abs_diff_eq!(quadratic().value(0.0, 0.0), 0.0);
        assert_abs_diff_eq!(rosenbrock().value(1.0, 1.0), 0.0);
        assert_abs_diff_eq!(himmelblau().value(3.0, 2.0), 0.0);
        assert_abs_diff_eq!(beale().value(3.0, 0.5), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ackley().value(0.0, 0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn domains_match_catalogue() {
        assert_relative_eq!(sinusoidal().domain().max(), PI);
        assert_relative_eq!(beale().domain().max(), 4.5);
        assert_relative_eq!(ackley().domain().min(), -5.0);
        assert_relative_eq!(custom_placeholder().domain().max(), 2.0);
    }

    #[test]
    fn custom_placeholder_is_flat() {
        let custom = custom_placeholder();
        assert_eq!(custom.id(), CUSTOM);
        assert_abs_diff_eq!(custom.value(1.0, -3.0), 0.0);
    }

    #[test]
    fn builtin_ids_are_recognized() {
        assert!(is_builtin(QUADRATIC));
        assert!(!is_builtin(CUSTOM));
        assert!(!is_builtin("unknown"));
    }
}
