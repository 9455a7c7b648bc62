//! Reusable observers for the Descent simulation loop.
//!
//! # Modules
//!
//! - [`traits`] — capability traits so observers can be written against what
//!   an event carries rather than a concrete event type
//!   ([`HasObjective`], [`HasGradientMagnitude`], [`CanPause`])
//!
//! # Features
//!
//! - `plot` — enables [`PlotObserver`] for charting a run via egui. This
//!   feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`HasObjective`]: traits::HasObjective
//! [`HasGradientMagnitude`]: traits::HasGradientMagnitude
//! [`CanPause`]: traits::CanPause

pub mod traits;

#[cfg(feature = "plot")]
mod plot;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
