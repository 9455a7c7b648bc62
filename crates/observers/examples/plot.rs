//! Compares the four optimizers on one function.
//!
//! Runs every optimizer from the same start point, headless and without
//! waiting on the tick interval, then opens a plot window with one trace per
//! optimizer.
//!
//! # Usage
//!
//! ```text
//! cargo run --example plot --features plot
//! cargo run --example plot --features plot -- himmelblau 0.01
//! cargo run --example plot --features plot -- rosenbrock 0.002 gradient
//! ```
//!
//! Arguments, all optional:
//!
//! 1. function id (default `rosenbrock`)
//! 2. learning rate (default `0.01`)
//! 3. `value` to chart `f(x, y)` (default) or `gradient` to chart `|∇f|` on a
//!    log scale

use std::error::Error;

use descent_functions::builtin;
use descent_observers::{PlotObserver, ShowConfig};
use descent_simulation::{Action, Config, Event, Simulation};
use descent_solvers::optimizer::OptimizerKind;

const MAX_TICKS: usize = 2_000;

#[derive(Clone, Copy)]
enum Metric {
    Value,
    Gradient,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let function = args.next().unwrap_or_else(|| builtin::ROSENBROCK.into());
    let learning_rate = match args.next() {
        Some(text) => text.parse::<f64>().unwrap_or_else(|_| {
            eprintln!("Invalid learning rate {text:?}, expected a number, e.g. 0.01");
            std::process::exit(1);
        }),
        None => 0.01,
    };
    let metric = match args.next().as_deref() {
        None | Some("value") => Metric::Value,
        Some("gradient") => Metric::Gradient,
        Some(other) => {
            eprintln!("Unknown metric: {other}");
            eprintln!("Usage: plot [function] [learning_rate] [value|gradient]");
            std::process::exit(1);
        }
    };

    let names = OptimizerKind::ALL.map(OptimizerKind::label);
    let mut obs = PlotObserver::new(names);
    let mut summary = Vec::new();

    for (slot, kind) in OptimizerKind::ALL.into_iter().enumerate() {
        let config = Config::default()
            .with_function(function.as_str())
            .with_optimizer(kind)
            .with_learning_rate(learning_rate)?;
        let mut sim = Simulation::new(config)?;

        sim.start();
        let ticks = sim.run(MAX_TICKS, &mut |event: &Event| {
            if let Event::Stepped { step, metrics, .. } = event {
                let y = match metric {
                    Metric::Value => metrics.value,
                    Metric::Gradient => metrics.gradient_magnitude,
                };
                let mut ys = [None; 4];
                ys[slot] = Some(y);
                obs.record(f64::from(*step), ys);
            }
            None::<Action>
        });

        let outcome = sim
            .stopping_reason()
            .map_or_else(|| "still running".to_owned(), |reason| reason.to_string());
        summary.push(format!("{kind}: {outcome} after {ticks} ticks"));
    }

    for line in &summary {
        println!("{line}");
    }

    let (label, config) = match metric {
        Metric::Value => ("f(x, y)", ShowConfig::new()),
        Metric::Gradient => ("|∇f|", ShowConfig::new().log_y()),
    };
    obs.show(
        config
            .title(format!("{label} on {function}, learning rate {learning_rate}"))
            .x_label("step")
            .legend(),
    )?;

    Ok(())
}
