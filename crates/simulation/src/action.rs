/// Actions an observer can request after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Pause the run after this tick, as if [`pause`] had been called.
    ///
    /// Ignored if the tick stopped the run.
    ///
    /// [`pause`]: crate::Simulation::pause
    Pause,
}
