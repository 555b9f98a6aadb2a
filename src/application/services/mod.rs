//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, ChartBackend)
//! but are themselves concrete structs, not traits.

mod plotter;

pub use plotter::{DistributionPlotter, PlotterOptions};
