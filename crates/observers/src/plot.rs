//! Charting observer for simulation runs.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use descent_core::Observer;
use descent_simulation::Event;
use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

/// Options for the window opened by [`PlotObserver::show`].
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Rosenbrock").legend().log_y())?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShowConfig {
    title: Option<String>,
    x_label: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// No title, no axis label, no legend, linear y-axis.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Labels each trace in a legend.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Plots `log₁₀(y)`. Non-positive samples are dropped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

/// Extracts chart samples from an event.
///
/// Returning `None` from [`x`](Plottable::x) skips the event; `None` in a
/// trace slot skips only that trace.
///
/// [`Event`] plots two traces against the step number: the function value
/// and the gradient magnitude. [`Event::Stopped`] moves no point and is
/// skipped.
pub trait Plottable<const N: usize> {
    fn x(&self) -> Option<f64>;

    fn traces(&self) -> [Option<f64>; N];
}

impl Plottable<2> for Event {
    fn x(&self) -> Option<f64> {
        match self {
            Event::Stepped { step, .. } => Some(f64::from(*step)),
            Event::Stopped { .. } => None,
        }
    }

    fn traces(&self) -> [Option<f64>; 2] {
        let metrics = self.metrics();
        [Some(metrics.value), Some(metrics.gradient_magnitude)]
    }
}

/// Collects `N` named traces during a run and charts them in an egui window.
///
/// Pass `&mut PlotObserver` straight to [`Simulation::tick`] or
/// [`Simulation::run`] when the event implements [`Plottable<N>`], or feed it
/// by hand with [`record`](Self::record) from a closure observer, for example
/// to overlay several runs in one chart.
///
/// ```ignore
/// let mut obs = PlotObserver::new(["f(x, y)", "|∇f|"]);
/// sim.start();
/// sim.run(500, &mut obs);
/// obs.show(ShowConfig::new().title("Adam on Himmelblau").legend())?;
/// ```
///
/// [`Simulation::tick`]: descent_simulation::Simulation::tick
/// [`Simulation::run`]: descent_simulation::Simulation::run
#[derive(Debug, Clone)]
pub struct PlotObserver<const N: usize> {
    traces: [Trace; N],
}

#[derive(Debug, Clone, Default)]
struct Trace {
    name: String,
    samples: Vec<[f64; 2]>,
}

impl<const N: usize> PlotObserver<N> {
    /// Creates an observer with one empty trace per name.
    #[must_use]
    pub fn new(names: [&str; N]) -> Self {
        Self {
            traces: names.map(|name| Trace {
                name: name.to_owned(),
                samples: Vec::new(),
            }),
        }
    }

    /// Appends `(x, y)` to each trace whose slot is `Some(y)`.
    pub fn record(&mut self, x: f64, ys: [Option<f64>; N]) {
        for (trace, y) in self.traces.iter_mut().zip(ys) {
            if let Some(y) = y {
                trace.samples.push([x, y]);
            }
        }
    }

    /// The samples recorded for trace `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn samples(&self, index: usize) -> &[[f64; 2]] {
        &self.traces[index].samples
    }

    /// Opens a window charting every trace and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let title = config.title.clone().unwrap_or_default();
        let app = PlotApp {
            traces: self.traces.into(),
            config,
        };

        eframe::run_native(
            &title,
            eframe::NativeOptions::default(),
            Box::new(move |_cc| Ok(Box::new(app))),
        )
    }
}

impl<const N: usize, E, A> Observer<E, A> for PlotObserver<N>
where
    E: Plottable<N>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

struct PlotApp {
    traces: Vec<Trace>,
    config: ShowConfig,
}

impl PlotApp {
    fn points(&self, trace: &Trace) -> PlotPoints {
        if self.config.log_y {
            trace
                .samples
                .iter()
                .filter(|[_, y]| *y > 0.0)
                .map(|&[x, y]| [x, y.log10()])
                .collect()
        } else {
            trace.samples.iter().copied().collect()
        }
    }
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("descent_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.clone());
            }
            if self.config.log_y {
                plot = plot.y_axis_label("log₁₀");
            }
            plot.show(ui, |plot_ui| {
                for trace in &self.traces {
                    plot_ui.line(Line::new(self.points(trace)).name(&trace.name));
                }
            });
        });
    }
}
