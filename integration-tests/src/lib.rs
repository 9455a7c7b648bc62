//! Shared helpers for the cross-crate tests.

use descent_simulation::{Action, Config, Event, Simulation};
use descent_solvers::optimizer::OptimizerKind;

/// Upper bound on ticks for runs expected to stop on their own.
pub const MAX_TICKS: usize = 10_000;

/// Builds an idle simulation of `kind` on `function`.
///
/// # Panics
///
/// Panics if the function is unknown or the learning rate is out of range.
#[must_use]
pub fn simulation(function: &str, kind: OptimizerKind, learning_rate: f64) -> Simulation {
    let config = Config::default()
        .with_function(function)
        .with_optimizer(kind)
        .with_learning_rate(learning_rate)
        .expect("learning rate in range");
    Simulation::new(config).expect("known function")
}

/// Starts `sim` and ticks until it stops, returning every event.
pub fn run_to_stop(sim: &mut Simulation) -> Vec<Event> {
    let mut events = Vec::new();
    sim.start();
    sim.run(MAX_TICKS, &mut |event: &Event| {
        events.push(*event);
        None::<Action>
    });
    events
}
