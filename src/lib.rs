//! arborplot: per-arbor distribution charts for neuron morphology analysis
//!
//! Layers, innermost first: `domain` (series, binning, chart descriptions),
//! `application` (the plotter service), `infrastructure` (PDF backend,
//! fonts, JSON input, wiring) and `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
