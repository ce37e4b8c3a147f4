//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while assembling the fit problem
//! - exported to JSON/CSV for the external fitting driver
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A measurement condition distinguished by solvent isotopic composition.
///
/// The co-refinement uses one dataset per contrast; solvent-dependent
/// parameters differ between them while structural parameters are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    D2o,
    H2o,
}

impl Contrast {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Contrast::D2o => "D2O",
            Contrast::H2o => "H2O",
        }
    }

    /// Marker character used in ASCII plots.
    pub fn plot_char(self) -> char {
        match self {
            Contrast::D2o => '*',
            Contrast::H2o => '+',
        }
    }
}

/// Which contrasts a command should operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContrastSpec {
    Both,
    D2o,
    H2o,
}

impl ContrastSpec {
    pub fn contrasts(self) -> Vec<Contrast> {
        match self {
            ContrastSpec::Both => vec![Contrast::D2o, Contrast::H2o],
            ContrastSpec::D2o => vec![Contrast::D2o],
            ContrastSpec::H2o => vec![Contrast::H2o],
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults that mirror the measured
/// experiment: 300 profile steps of 0.5 Å, Nevot-Croce interfaces).
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Reflectivity data measured against D2O.
    pub d2o_path: PathBuf,
    /// Reflectivity data measured against H2O.
    pub h2o_path: PathBuf,
    /// Number of steps in the bilayer profile grid.
    pub dimension: usize,
    /// Step length (Å) of the bilayer profile grid.
    pub stepsize: f64,
    /// Step-profile interface treatment for the downstream solver.
    ///
    /// `false` means the Nevot-Croce roughness approximation; `true` means
    /// microslabbed interfaces. Recorded in the export, not interpreted here.
    pub step_interfaces: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            d2o_path: PathBuf::from("sim1.dat"),
            h2o_path: PathBuf::from("sim0.dat"),
            dimension: 300,
            stepsize: 0.5,
            step_interfaces: false,
        }
    }
}

impl ModelSettings {
    /// Data file for the given contrast.
    pub fn data_path(&self, contrast: Contrast) -> &PathBuf {
        match contrast {
            Contrast::D2o => &self.d2o_path,
            Contrast::H2o => &self.h2o_path,
        }
    }

    /// Total thickness (Å) of the functional bilayer layer.
    pub fn profile_thickness(&self) -> f64 {
        self.dimension as f64 * self.stepsize
    }
}

/// Summary stats about the reflectivity points actually loaded for a probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DatasetStats {
    pub n_points: usize,
    pub q_min: f64,
    pub q_max: f64,
    pub r_min: f64,
    pub r_max: f64,
}

/// An SLD depth profile evaluated on the bilayer z-grid.
///
/// `rho` is in the conventional 1e-6 Å^-2 units used everywhere outside the
/// composition math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTrace {
    pub contrast: Contrast,
    pub z: Vec<f64>,
    pub rho: Vec<f64>,
}

/// Outcome of one configuration sanity check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_thickness_matches_grid() {
        let settings = ModelSettings::default();
        assert!((settings.profile_thickness() - 150.0).abs() < 1e-12);
    }

    #[test]
    fn contrast_spec_expands_both() {
        assert_eq!(
            ContrastSpec::Both.contrasts(),
            vec![Contrast::D2o, Contrast::H2o]
        );
        assert_eq!(ContrastSpec::H2o.contrasts(), vec![Contrast::H2o]);
    }
}
