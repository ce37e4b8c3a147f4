//! Shared pipeline logic used by all subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! build model graph -> load data -> validate -> evaluate profiles
//!
//! The subcommands can then focus on presentation (printing vs exporting).

use crate::domain::{ContrastSpec, ModelSettings, ProfileTrace};
use crate::error::AppError;
use crate::fit::FitProblem;
use crate::sample::Layer;
use crate::setup::BilayerModel;

/// Build the full problem (data files required) and validate it.
pub fn build_validated(settings: &ModelSettings) -> Result<FitProblem, AppError> {
    let problem = crate::setup::build_problem(settings)?;
    problem.validate()?;
    Ok(problem)
}

/// Evaluate the bilayer profile per contrast without touching data files.
///
/// Used by `nrb profile`, which inspects the sample side only.
pub fn standalone_profiles(
    settings: &ModelSettings,
    spec: ContrastSpec,
) -> Result<Vec<ProfileTrace>, AppError> {
    let model = BilayerModel::new();
    let mut traces = Vec::new();
    for contrast in spec.contrasts() {
        let layer = model.functional_layer(contrast, settings);
        let rho = layer.evaluate()?;
        traces.push(ProfileTrace {
            contrast,
            z: layer.z_grid(),
            rho,
        });
    }
    Ok(traces)
}

/// Evaluate the functional layers of an assembled problem.
pub fn problem_profiles(problem: &FitProblem) -> Result<Vec<ProfileTrace>, AppError> {
    let mut traces = Vec::new();
    for experiment in problem.experiments() {
        for layer in experiment.sample.layers() {
            if let Layer::Functional(functional) = layer {
                let rho = functional.evaluate()?;
                traces.push(ProfileTrace {
                    contrast: experiment.contrast,
                    z: functional.z_grid(),
                    rho,
                });
            }
        }
    }
    Ok(traces)
}
