//! Optimizer step rules.
//!
//! # Algorithm
//!
//! Each rule maps the current gradient `g` to a position delta `d`, updating
//! its accumulators in a caller-owned [`RunState`]. The caller moves the point
//! downhill to `(x - dx, y - dy)`. All rules operate on each axis
//! independently.
//!
//! | kind | update |
//! |------|--------|
//! | SGD | `d = lr·g` |
//! | Momentum | `v ← μ·v + lr·g`, `d = v` |
//! | RMSProp | `E ← β₂·E + (1-β₂)·g²`, `d = lr·g / √(E + ε)` |
//! | Adam | `m ← μ·m + (1-μ)·g`, `v ← β₂·v + (1-β₂)·g²`, `d = lr·m̂ / (√v̂ + ε)` |
//!
//! Adam's bias-corrected moments are `m̂ = m / (1 - μᵗ)` and
//! `v̂ = v / (1 - β₂ᵗ)`. Note that Adam reuses the `momentum` parameter `μ`
//! as its β₁; there is no separate slot.
//!
//! # State ownership
//!
//! [`RunState`] is an explicit value owned by whoever drives the run and
//! passed to [`step`] by mutable reference. It must be reset whenever the
//! optimizer kind or the surface changes so that stale moments never leak
//! into a new run.

mod kind;
mod params;
mod state;

#[cfg(test)]
mod tests;

pub use kind::{OptimizerKind, UnknownKindError};
pub use params::{Params, ParamsError};
pub use state::{GradientHistory, HISTORY_CAPACITY, RunState};

/// Computes the position delta for one step and updates `state` in place.
///
/// The step counter in `state` advances by exactly one per call, whatever
/// the kind, so Adam's bias-correction exponent is always at least `1`.
#[must_use]
pub fn step(
    kind: OptimizerKind,
    grad: [f64; 2],
    learning_rate: f64,
    params: &Params,
    state: &mut RunState,
) -> [f64; 2] {
    state.steps += 1;

    match kind {
        OptimizerKind::Sgd => grad.map(|g| learning_rate * g),
        OptimizerKind::Momentum => momentum(grad, learning_rate, params, state),
        OptimizerKind::RmsProp => rms_prop(grad, learning_rate, params, state),
        OptimizerKind::Adam => adam(grad, learning_rate, params, state),
    }
}

fn momentum(grad: [f64; 2], lr: f64, params: &Params, state: &mut RunState) -> [f64; 2] {
    let mu = params.momentum();
    for (v, g) in state.velocity.iter_mut().zip(grad) {
        *v = mu * *v + lr * g;
    }
    state.velocity
}

fn rms_prop(grad: [f64; 2], lr: f64, params: &Params, state: &mut RunState) -> [f64; 2] {
    let beta2 = params.beta2();
    let eps = params.epsilon();
    let mut delta = [0.0; 2];
    for axis in 0..2 {
        let g = grad[axis];
        let e = &mut state.squared_grad[axis];
        *e = beta2 * *e + (1.0 - beta2) * g * g;
        delta[axis] = (lr / (*e + eps).sqrt()) * g;
    }
    delta
}

fn adam(grad: [f64; 2], lr: f64, params: &Params, state: &mut RunState) -> [f64; 2] {
    let beta1 = params.momentum();
    let beta2 = params.beta2();
    let eps = params.epsilon();
    let t = f64::from(state.steps);

    // Both are > 0 since t >= 1 and the betas are validated to lie in [0, 1).
    let correction1 = 1.0 - beta1.powf(t);
    let correction2 = 1.0 - beta2.powf(t);

    let mut delta = [0.0; 2];
    for axis in 0..2 {
        let g = grad[axis];
        let m = &mut state.first_moment[axis];
        *m = beta1 * *m + (1.0 - beta1) * g;
        let v = &mut state.second_moment[axis];
        *v = beta2 * *v + (1.0 - beta2) * g * g;

        let m_hat = state.first_moment[axis] / correction1;
        let v_hat = state.second_moment[axis] / correction2;
        delta[axis] = (lr * m_hat) / (v_hat.sqrt() + eps);
    }
    delta
}
