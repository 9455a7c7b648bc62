use approx::assert_abs_diff_eq;
use descent_functions::builtin;
use descent_simulation::{Event, Status};
use descent_solvers::{optimizer::OptimizerKind, stopping::StoppingReason};
use integration_tests::{run_to_stop, simulation};

#[test]
fn every_optimizer_finds_the_bowl_minimum() {
    let cases = [
        (OptimizerKind::Sgd, 0.1),
        (OptimizerKind::Momentum, 0.001),
        (OptimizerKind::RmsProp, 0.1),
        (OptimizerKind::Adam, 0.01),
    ];

    for (kind, learning_rate) in cases {
        let mut sim = simulation(builtin::QUADRATIC, kind, learning_rate);
        run_to_stop(&mut sim);

        assert_eq!(
            sim.stopping_reason(),
            Some(StoppingReason::Converged),
            "{kind}"
        );
        assert_abs_diff_eq!(sim.point().x(), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(sim.point().y(), 0.0, epsilon = 1e-3);
    }
}

#[test]
fn himmelblau_settles_in_the_nearest_basin() {
    for (kind, learning_rate) in [
        (OptimizerKind::Sgd, 0.01),
        (OptimizerKind::RmsProp, 0.1),
        (OptimizerKind::Adam, 0.01),
    ] {
        let mut sim = simulation(builtin::HIMMELBLAU, kind, learning_rate);
        run_to_stop(&mut sim);

        assert_eq!(
            sim.stopping_reason(),
            Some(StoppingReason::Converged),
            "{kind}"
        );
        assert_abs_diff_eq!(sim.point().x(), 3.0, epsilon = 1e-3);
        assert_abs_diff_eq!(sim.point().y(), 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(sim.point().z(), 0.0, epsilon = 1e-6);
    }
}

#[test]
fn steep_valley_throws_sgd_out_of_bounds() {
    let mut sim = simulation(builtin::ROSENBROCK, OptimizerKind::Sgd, 0.1);
    let events = run_to_stop(&mut sim);

    assert_eq!(events.len(), 2);
    assert_eq!(sim.stopping_reason(), Some(StoppingReason::OutOfBounds));
    assert!(sim.point().x().abs() > 4.0);
}

#[test]
fn overshooting_momentum_trips_the_divergence_check() {
    // Heavy momentum on the bowl swings through the minimum with growing
    // slope for several ticks in a row.
    let mut sim = simulation(builtin::QUADRATIC, OptimizerKind::Momentum, 0.1);
    let events = run_to_stop(&mut sim);

    assert_eq!(sim.stopping_reason(), Some(StoppingReason::Diverged));
    assert_eq!(events.len(), 8);
}

#[test]
fn events_trace_the_trajectory() {
    let mut sim = simulation(builtin::QUADRATIC, OptimizerKind::RmsProp, 0.1);
    let events = run_to_stop(&mut sim);

    let (last, steps) = events.split_last().expect("at least one event");
    assert!(matches!(last, Event::Stopped { .. }));
    assert!(steps.iter().all(|e| matches!(e, Event::Stepped { .. })));

    let from_events: Vec<_> = std::iter::once(sim.trajectory().start())
        .chain(steps.iter().map(Event::point))
        .collect();
    let recorded: Vec<_> = sim.trajectory().points().collect();
    assert_eq!(from_events, recorded);

    let lengths = sim.trajectory().segment_lengths();
    assert_eq!(lengths.len(), steps.len());
    assert!(lengths.iter().all(|l| *l > 0.0));
}

#[test]
fn stopped_runs_restart_from_where_they_stopped() {
    let mut sim = simulation(builtin::QUADRATIC, OptimizerKind::Sgd, 0.1);
    run_to_stop(&mut sim);
    let count = sim.trajectory().point_count();

    // Still converged, so the restart stops on its first tick.
    let events = run_to_stop(&mut sim);

    assert_eq!(events.len(), 1);
    assert_eq!(sim.status(), Status::Stopped(StoppingReason::Converged));
    assert_eq!(sim.trajectory().point_count(), count);
}

#[test]
fn switching_mid_run_never_leaks_state() {
    let mut sim = simulation(builtin::BEALE, OptimizerKind::Adam, 0.01);
    sim.start();
    sim.run(20, &mut ());

    for kind in OptimizerKind::ALL {
        sim.set_optimizer(kind);
        let state = sim.run_state();
        assert!(state.is_pristine(), "{kind}");
        assert_eq!(state.velocity(), [0.0, 0.0]);
        assert_eq!(state.squared_grad(), [0.0, 0.0]);
        assert_eq!(state.first_moment(), [0.0, 0.0]);
        assert_eq!(state.second_moment(), [0.0, 0.0]);
        assert!(state.history().is_empty());
        sim.run(3, &mut ());
    }
}
