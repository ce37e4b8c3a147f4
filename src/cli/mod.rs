//! Command-line parsing for the bilayer model builder.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the model/composition code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ContrastSpec, ModelSettings};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "nrb",
    version,
    about = "Neutron reflectometry bilayer model builder (DOPC on TiOx)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the co-refinement problem and print the full summary.
    Describe(BuildArgs),
    /// Evaluate and plot the bilayer SLD profile (needs no data files).
    Profile(ProfileArgs),
    /// Run the configuration sanity checks; non-zero exit on failure.
    Check(BuildArgs),
    /// Export the assembled problem as JSON for the fitting driver.
    Export(ExportArgs),
}

/// Common options for building the model.
#[derive(Debug, Parser, Clone)]
pub struct BuildArgs {
    /// D2O-contrast reflectivity data file.
    #[arg(long = "d2o-data", value_name = "DAT", default_value = "sim1.dat")]
    pub d2o_data: PathBuf,

    /// H2O-contrast reflectivity data file.
    #[arg(long = "h2o-data", value_name = "DAT", default_value = "sim0.dat")]
    pub h2o_data: PathBuf,

    /// Number of steps in the bilayer profile grid.
    #[arg(long, default_value_t = 300)]
    pub dimension: usize,

    /// Step length (Å) of the bilayer profile grid.
    #[arg(long, default_value_t = 0.5)]
    pub stepsize: f64,

    /// Use microslabbed interfaces instead of the Nevot-Croce approximation.
    #[arg(long)]
    pub step_interfaces: bool,
}

impl BuildArgs {
    pub fn settings(&self) -> ModelSettings {
        ModelSettings {
            d2o_path: self.d2o_data.clone(),
            h2o_path: self.h2o_data.clone(),
            dimension: self.dimension,
            stepsize: self.stepsize,
            step_interfaces: self.step_interfaces,
        }
    }
}

/// Options for profile evaluation and plotting.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Which contrast(s) to evaluate.
    #[arg(long, value_enum, default_value = "both")]
    pub contrast: ContrastSpec,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the profile grid to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for the problem JSON export.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Output JSON path.
    #[arg(long, value_name = "JSON")]
    pub output: PathBuf,
}
