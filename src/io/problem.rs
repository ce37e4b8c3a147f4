//! Problem JSON export.
//!
//! The JSON file is the handoff artifact for the external fitting driver:
//! - the fittable parameter vector (names, values, bounds)
//! - per-experiment dataset stats and stepping config
//! - the current SLD depth profiles (for quick plotting downstream)
//!
//! Only values cross this boundary; parameter identity does not survive
//! serialization, so sharing is recorded implicitly by the deduplicated
//! vector.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Contrast, DatasetStats, ModelSettings, ProfileTrace};
use crate::error::AppError;
use crate::fit::FitProblem;

/// A fittable parameter as seen by the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub name: String,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalEdgeEntry {
    pub qc: f64,
    pub q_lo: f64,
    pub q_hi: f64,
    pub n_points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentEntry {
    pub contrast: Contrast,
    pub data_path: String,
    pub stats: DatasetStats,
    pub back_reflectivity: bool,
    pub dz: f64,
    pub step_interfaces: bool,
    pub critical_edge: Option<CriticalEdgeEntry>,
}

/// The portable representation of the assembled problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFile {
    pub tool: String,
    pub created: String,
    pub name: String,
    pub dimension: usize,
    pub stepsize: f64,
    pub parameters: Vec<ParameterEntry>,
    pub experiments: Vec<ExperimentEntry>,
    pub profiles: Vec<ProfileTrace>,
}

/// Build the portable problem description.
pub fn problem_file(
    problem: &FitProblem,
    settings: &ModelSettings,
    profiles: Vec<ProfileTrace>,
) -> ProblemFile {
    let parameters = problem
        .fittable()
        .iter()
        .filter_map(|p| {
            let (lower, upper) = p.bounds()?;
            Some(ParameterEntry {
                name: p.name(),
                value: p.value(),
                lower,
                upper,
            })
        })
        .collect();

    let experiments = problem
        .experiments()
        .iter()
        .map(|e| ExperimentEntry {
            contrast: e.contrast,
            data_path: e.probe.data.path.display().to_string(),
            stats: e.probe.stats(),
            back_reflectivity: e.probe.back_reflectivity,
            dz: e.dz,
            step_interfaces: e.step_interfaces,
            critical_edge: e.probe.critical.as_ref().map(|edge| CriticalEdgeEntry {
                qc: edge.qc,
                q_lo: edge.q_lo,
                q_hi: edge.q_hi,
                n_points: edge.points.len(),
            }),
        })
        .collect();

    ProblemFile {
        tool: "nrb".to_string(),
        created: chrono::Utc::now().to_rfc3339(),
        name: problem.name().to_string(),
        dimension: settings.dimension,
        stepsize: settings.stepsize,
        parameters,
        experiments,
        profiles,
    }
}

/// Write a problem JSON file.
pub fn write_problem_json(path: &Path, file: &ProblemFile) -> Result<(), AppError> {
    let out = File::create(path).map_err(|e| {
        AppError::usage(format!(
            "Failed to create problem JSON '{}': {e}",
            path.display()
        ))
    })?;

    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::usage(format!("Failed to write problem JSON: {e}")))?;

    Ok(())
}
