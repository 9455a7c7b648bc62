use approx::assert_relative_eq;

use super::{OptimizerKind, Params, RunState, step};

const LR: f64 = 0.1;

fn run(kind: OptimizerKind, grads: &[[f64; 2]]) -> (Vec<[f64; 2]>, RunState) {
    let params = Params::default();
    let mut state = RunState::new();
    let deltas = grads
        .iter()
        .map(|&g| step(kind, g, LR, &params, &mut state))
        .collect();
    (deltas, state)
}

#[test]
fn sgd_scales_gradient_by_learning_rate() {
    // Quadratic bowl at (1.5, 1.5): gradient (3, 3).
    let (deltas, state) = run(OptimizerKind::Sgd, &[[3.0, 3.0]]);

    let [dx, dy] = deltas[0];
    assert_relative_eq!(dx, 0.3);
    assert_relative_eq!(dy, 0.3);
    assert_relative_eq!(1.5 - dx, 1.2);

    // Stateless apart from the step counter.
    assert_eq!(state.velocity(), [0.0, 0.0]);
    assert_eq!(state.squared_grad(), [0.0, 0.0]);
    assert_eq!(state.first_moment(), [0.0, 0.0]);
}

#[test]
fn momentum_accumulates_velocity() {
    let (deltas, state) = run(OptimizerKind::Momentum, &[[1.0, -2.0], [1.0, -2.0]]);

    assert_relative_eq!(deltas[0][0], 0.1);
    assert_relative_eq!(deltas[0][1], -0.2);
    // v = 0.9 * 0.1 + 0.1 * 1
    assert_relative_eq!(deltas[1][0], 0.19);
    assert_relative_eq!(deltas[1][1], -0.38);
    assert_eq!(state.velocity(), deltas[1]);
}

#[test]
fn rms_prop_normalizes_by_running_square() {
    let (deltas, state) = run(OptimizerKind::RmsProp, &[[2.0, 0.0]]);

    // E = 0.001 * 4
    let e = (1.0 - 0.999) * 4.0;
    assert_relative_eq!(state.squared_grad()[0], e);
    assert_relative_eq!(deltas[0][0], LR / (e + 1e-8).sqrt() * 2.0);
    assert_relative_eq!(deltas[0][1], 0.0);
}

#[test]
fn adam_first_step_is_learning_rate_times_sign() {
    let (deltas, state) = run(OptimizerKind::Adam, &[[3.0, -0.5]]);

    // With bias correction, m̂ = g and v̂ = g² on the first step.
    assert_relative_eq!(deltas[0][0], LR, epsilon = 1e-8);
    assert_relative_eq!(deltas[0][1], -LR, epsilon = 1e-8);
    assert_eq!(state.steps(), 1);
}

#[test]
fn adam_moments_follow_recurrences() {
    let (_, state) = run(OptimizerKind::Adam, &[[1.0, 2.0], [3.0, 4.0]]);

    let (b1, b2) = (0.9, 0.999);
    let m = b1 * ((1.0 - b1) * 1.0) + (1.0 - b1) * 3.0;
    let v = b2 * ((1.0 - b2) * 1.0) + (1.0 - b2) * 9.0;
    assert_relative_eq!(state.first_moment()[0], m);
    assert_relative_eq!(state.second_moment()[0], v);
}

#[test]
fn step_counter_advances_once_per_call() {
    for kind in OptimizerKind::ALL {
        let (_, state) = run(kind, &[[1.0, 1.0]; 7]);
        assert_eq!(state.steps(), 7, "{kind}");
    }
}

#[test]
fn adam_bias_correction_stays_finite() {
    // momentum = 0 makes 1 - μᵗ exactly 1; the largest allowed decay still
    // leaves a positive denominator.
    for momentum in [0.0, 0.5, 0.999_999] {
        let params = Params::new(momentum, 0.999_999, 1e-8).unwrap();
        let mut state = RunState::new();
        for _ in 0..50 {
            let [dx, dy] = step(OptimizerKind::Adam, [0.3, -0.7], LR, &params, &mut state);
            assert!(dx.is_finite() && dy.is_finite());
        }
    }
}

#[test]
fn reset_clears_accumulated_moments() {
    let (_, mut state) = run(OptimizerKind::Adam, &[[1.0, 1.0]; 3]);
    state.record_magnitude(1.0);
    assert!(!state.is_pristine());

    state.reset();

    assert!(state.is_pristine());
    assert_eq!(state.first_moment(), [0.0, 0.0]);
    assert_eq!(state.second_moment(), [0.0, 0.0]);
    assert!(state.history().is_empty());
}
