//! `nr-bilayer` library crate.
//!
//! The binary (`nrb`) is a thin wrapper around this library so that:
//!
//! - the model graph is testable without spawning processes
//! - modules are reusable (e.g., future batch tooling, notebooks, etc.)
//! - code stays easy to navigate as the model grows more contrasts

pub mod app;
pub mod bilayer;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod params;
pub mod plot;
pub mod probe;
pub mod report;
pub mod sample;
pub mod setup;
