use std::time::Duration;

use descent_core::{Observer, Point3, Surface};
use descent_functions::{FunctionDef, FunctionRegistry, builtin};
use descent_mesh::MeshData;
use descent_solvers::{
    gradient,
    optimizer::{self, OptimizerKind, Params, RunState},
    stopping::StoppingReason,
};

use crate::{
    Action, Clock, Config, ConfigError, Event, Metrics, SimulationError, Status, Ticker, Trajectory,
};

/// An interactive gradient descent run over a selectable function.
///
/// See the [crate docs](crate) for the tick sequence and reset rules.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    registry: FunctionRegistry,
    function: FunctionDef,
    status: Status,
    point: Point3,
    trajectory: Trajectory,
    metrics: Metrics,
    run_state: RunState,
    ticker: Ticker,
    mesh: Option<CachedMesh>,
}

#[derive(Debug)]
struct CachedMesh {
    key: MeshKey,
    data: MeshData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MeshKey {
    function: String,
    version: u64,
    resolution: u32,
}

impl Simulation {
    /// Creates an idle simulation at the configured start point.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownFunction`] if the configured function
    /// is not in the registry.
    pub fn new(config: Config) -> Result<Self, SimulationError> {
        Self::with_registry(config, FunctionRegistry::new())
    }

    /// Creates an idle simulation over an existing registry.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownFunction`] if the configured function
    /// is not in `registry`.
    pub fn with_registry(
        config: Config,
        registry: FunctionRegistry,
    ) -> Result<Self, SimulationError> {
        let function = lookup(&registry, config.function())?;
        let [x, y] = config.start();
        let point = Point3::on(&function, x, y);

        Ok(Self {
            ticker: Ticker::new(config.interval()),
            config,
            registry,
            function,
            status: Status::Idle,
            point,
            trajectory: Trajectory::new(point),
            metrics: Metrics::at_rest(point.z()),
            run_state: RunState::new(),
            mesh: None,
        })
    }

    /// Selects the function with identifier `id` and moves to the start point.
    ///
    /// Discards the trajectory and run state. A running or paused run
    /// becomes idle; a stopped run keeps its reason.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::UnknownFunction`] if `id` is not registered.
    /// The simulation is left unchanged.
    pub fn select_function(&mut self, id: &str) -> Result<(), SimulationError> {
        self.function = lookup(&self.registry, id)?;
        log::info!("selected function '{id}'");

        let [x, y] = self.config.start();
        self.move_to(x, y);
        self.reset_run_state();
        self.interrupt();
        Ok(())
    }

    /// Compiles `source` into the `custom` function and returns the new
    /// registry version.
    ///
    /// Text that does not parse keeps the previous custom definition. Either
    /// way the run state is discarded. If `custom` is selected, the point
    /// keeps its `x` and `y`, its height is recomputed, and a running or
    /// paused run becomes idle.
    pub fn set_custom(&mut self, source: &str) -> u64 {
        let version = self.registry.set_custom(source);
        self.reset_run_state();

        if self.function.id() == builtin::CUSTOM {
            self.function = self.registry.custom().clone();
            self.move_to(self.point.x(), self.point.y());
            self.interrupt();
        }
        version
    }

    /// Sets the learning rate used by subsequent steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is out of range. The current rate is kept.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), ConfigError> {
        self.config = self.config.clone().with_learning_rate(learning_rate)?;
        Ok(())
    }

    /// Sets the tick interval used by [`poll`](Self::poll).
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is out of range. The current interval
    /// is kept.
    pub fn set_interval(&mut self, interval: Duration) -> Result<(), ConfigError> {
        self.config = self.config.clone().with_interval(interval)?;
        self.ticker.set_interval(interval);
        Ok(())
    }

    /// Switches optimizer, discarding the run state and trajectory.
    ///
    /// The run status is unchanged.
    pub fn set_optimizer(&mut self, kind: OptimizerKind) {
        self.config = self.config.clone().with_optimizer(kind);
        self.reset_run_state();
        self.trajectory.restart(self.point);
        log::info!("optimizer set to {kind}");
    }

    /// Replaces the optimizer parameters used by subsequent steps.
    pub fn set_params(&mut self, params: Params) {
        self.config = self.config.clone().with_params(params);
    }

    /// Moves the current point to `(x, y)`, starting a new trajectory there.
    ///
    /// Points where the analytic gradient is undefined, such as the origin of
    /// [`ackley`](descent_functions::builtin::ackley), make every later step NaN.
    pub fn set_current_point(&mut self, x: f64, y: f64) {
        self.point = Point3::on(&self.function, x, y);
        self.trajectory.restart(self.point);
    }

    /// Starts a run.
    ///
    /// From idle or stopped, the run begins with fresh optimizer state from
    /// the current point and any stopping reason is cleared. From paused this
    /// is [`resume`](Self::resume). While running it does nothing.
    pub fn start(&mut self) {
        match self.status {
            Status::Idle | Status::Stopped(_) => {
                self.reset_run_state();
                self.status = Status::Running;
                self.ticker.arm();
                log::info!("started at ({}, {})", self.point.x(), self.point.y());
            }
            Status::Paused => self.resume(),
            Status::Running => {}
        }
    }

    /// Pauses a running run. Otherwise does nothing.
    pub fn pause(&mut self) {
        if self.status == Status::Running {
            self.status = Status::Paused;
            self.ticker.disarm();
            log::info!("paused");
        }
    }

    /// Resumes a paused run, keeping its optimizer state. Otherwise does
    /// nothing.
    pub fn resume(&mut self) {
        if self.status == Status::Paused {
            self.status = Status::Running;
            self.ticker.arm();
            log::info!("resumed");
        }
    }

    /// Pauses if running, resumes if paused, and starts otherwise.
    pub fn toggle(&mut self) {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            Status::Idle | Status::Stopped(_) => self.start(),
        }
    }

    /// Returns to idle at the start point with a fresh trajectory, run state,
    /// and metrics.
    pub fn reset(&mut self) {
        let [x, y] = self.config.start();
        self.move_to(x, y);
        self.reset_run_state();
        self.status = Status::Idle;
        self.ticker.disarm();
        log::info!("reset");
    }

    /// Runs one tick if the simulation is running.
    ///
    /// Returns the emitted event, or `None` if not running.
    pub fn tick<O>(&mut self, observer: &mut O) -> Option<Event>
    where
        O: Observer<Event, Action> + ?Sized,
    {
        if !self.status.is_running() {
            return None;
        }

        let from = self.point;
        let (x, y) = (from.x(), from.y());

        let grad = gradient::gradient(&self.function, x, y);
        let magnitude = gradient::magnitude(grad);
        self.metrics = Metrics {
            value: self.function.value(x, y),
            gradient_magnitude: magnitude,
        };
        self.run_state.record_magnitude(magnitude);

        let reason = self.config.policy().evaluate(
            x,
            y,
            magnitude,
            self.run_state.history(),
            self.function.domain().max(),
        );

        let event = match reason {
            Some(reason) => {
                self.stop(reason);
                Event::Stopped {
                    point: from,
                    metrics: self.metrics,
                    reason,
                }
            }
            None => {
                let [dx, dy] = optimizer::step(
                    self.config.optimizer(),
                    grad,
                    self.config.learning_rate(),
                    &self.config.params(),
                    &mut self.run_state,
                );
                self.point = Point3::on(&self.function, x - dx, y - dy);
                self.trajectory.push(self.point);
                log::trace!(
                    "step {}: ({x}, {y}) |∇f| = {magnitude} -> ({}, {})",
                    self.run_state.steps(),
                    self.point.x(),
                    self.point.y(),
                );
                Event::Stepped {
                    step: self.run_state.steps(),
                    from,
                    to: self.point,
                    gradient: grad,
                    metrics: self.metrics,
                }
            }
        };

        if let Some(Action::Pause) = observer.observe(&event) {
            self.pause();
        }
        Some(event)
    }

    /// Runs one tick if one is due at `clock`'s current time.
    pub fn poll<C, O>(&mut self, clock: &C, observer: &mut O) -> Option<Event>
    where
        C: Clock + ?Sized,
        O: Observer<Event, Action> + ?Sized,
    {
        if self.ticker.poll(clock.now()) {
            self.tick(observer)
        } else {
            None
        }
    }

    /// Ticks until the run is no longer running or `max_ticks` have run,
    /// ignoring the tick interval.
    ///
    /// Returns the number of ticks run.
    pub fn run<O>(&mut self, max_ticks: usize, observer: &mut O) -> usize
    where
        O: Observer<Event, Action> + ?Sized,
    {
        let mut ticks = 0;
        while ticks < max_ticks && self.tick(observer).is_some() {
            ticks += 1;
        }
        ticks
    }

    /// The surface mesh of the selected function.
    ///
    /// Regenerated only when the function, its registry version, or the
    /// resolution has changed since the last call.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured resolution cannot be meshed.
    pub fn mesh(&mut self) -> Result<&MeshData, SimulationError> {
        let key = MeshKey {
            function: self.function.id().to_owned(),
            version: self.registry.version(),
            resolution: self.config.resolution(),
        };

        let cached = match self.mesh.take() {
            Some(cached) if cached.key == key => cached,
            _ => {
                log::debug!(
                    "generating mesh for '{}' (version {}, resolution {})",
                    key.function,
                    key.version,
                    key.resolution,
                );
                let data = descent_mesh::generate_surface(&self.function, key.resolution)?;
                CachedMesh { key, data }
            }
        };
        Ok(&self.mesh.insert(cached).data)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The current point.
    #[must_use]
    pub fn point(&self) -> Point3 {
        self.point
    }

    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Why the last run halted, if it is stopped.
    #[must_use]
    pub fn stopping_reason(&self) -> Option<StoppingReason> {
        self.status.stopping_reason()
    }

    /// Unit vector pointing downhill from the current point, or `(1, 0)` on
    /// a flat spot.
    #[must_use]
    pub fn descent_direction(&self) -> [f64; 2] {
        let grad = gradient::gradient(&self.function, self.point.x(), self.point.y());
        gradient::descent_direction(grad)
    }

    /// The selected function.
    #[must_use]
    pub fn function(&self) -> &FunctionDef {
        &self.function
    }

    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    /// Moves to `(x, y)` with a fresh trajectory and resting metrics.
    fn move_to(&mut self, x: f64, y: f64) {
        self.point = Point3::on(&self.function, x, y);
        self.trajectory.restart(self.point);
        self.metrics = Metrics::at_rest(self.point.z());
    }

    fn reset_run_state(&mut self) {
        self.run_state.reset();
        log::debug!("optimizer run state reset");
    }

    /// Drops a running or paused run back to idle.
    fn interrupt(&mut self) {
        if matches!(self.status, Status::Running | Status::Paused) {
            self.status = Status::Idle;
            self.ticker.disarm();
        }
    }

    fn stop(&mut self, reason: StoppingReason) {
        self.status = Status::Stopped(reason);
        self.ticker.disarm();
        log::info!(
            "stopped ({reason}) after {} steps at ({}, {})",
            self.run_state.steps(),
            self.point.x(),
            self.point.y(),
        );
    }
}

fn lookup(registry: &FunctionRegistry, id: &str) -> Result<FunctionDef, SimulationError> {
    registry
        .get(id)
        .cloned()
        .ok_or_else(|| SimulationError::UnknownFunction(id.to_owned()))
}
