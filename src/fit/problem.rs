//! The jointly-refined fit problem.
//!
//! Experiments in a problem are optimized together: a parameter used by
//! several experiments moves once per fit step. Sharing is decided purely by
//! cell identity (see `params`), so the parameter list exposed to the driver
//! is identity-deduplicated in deterministic order.

use crate::error::AppError;
use crate::fit::Experiment;
use crate::params::{unique_parameters, Parameter};

/// A named collection of experiments refined jointly.
#[derive(Debug, Clone)]
pub struct FitProblem {
    name: String,
    experiments: Vec<Experiment>,
}

impl FitProblem {
    pub fn new(name: impl Into<String>, experiments: Vec<Experiment>) -> Self {
        Self {
            name: name.into(),
            experiments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    /// All unique parameters, experiment by experiment, sample before probe.
    pub fn parameters(&self) -> Vec<Parameter> {
        let all: Vec<Parameter> = self
            .experiments
            .iter()
            .flat_map(|e| e.parameters())
            .collect();
        unique_parameters(&all)
    }

    /// The fittable parameter vector handed to the optimizer: unique
    /// parameters that carry a range.
    pub fn fittable(&self) -> Vec<Parameter> {
        self.parameters()
            .into_iter()
            .filter(|p| !p.is_fixed())
            .collect()
    }

    /// Validate the whole configuration: stacks are well-formed and every
    /// parameter range brackets its value.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.experiments.is_empty() {
            return Err(AppError::model("Fit problem has no experiments."));
        }
        for experiment in &self.experiments {
            experiment.sample.validate()?;
            if !(experiment.dz.is_finite() && experiment.dz > 0.0) {
                return Err(AppError::model(format!(
                    "Experiment {} has invalid dz={}.",
                    experiment.contrast.display_name(),
                    experiment.dz
                )));
            }
        }
        for parameter in self.parameters() {
            parameter.check()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contrast;
    use crate::io::{ReflData, ReflPoint};
    use crate::params::Parameter;
    use crate::probe::Probe;
    use crate::sample::{Material, Slab, Stack};
    use std::path::PathBuf;

    fn dummy_probe(contrast: Contrast) -> Probe {
        let data = ReflData {
            path: PathBuf::from("test.dat"),
            points: vec![ReflPoint {
                q: 0.01,
                r: 1.0,
                dr: 0.01,
                dq: 0.0005,
            }],
            row_errors: vec![],
            rows_read: 1,
        };
        Probe::new(contrast, data, true)
    }

    fn two_layer_stack(solvent: &str, rho: f64) -> Stack {
        Stack::new()
            .slab(Slab::semi_infinite(
                Material::fixed("silicon", 2.069, 0.0),
                Parameter::fixed("silicon interface", 0.0),
            ))
            .slab(Slab::semi_infinite(
                Material::fixed(solvent, rho, 0.0),
                Parameter::fixed(format!("{solvent} interface"), 5.0),
            ))
    }

    #[test]
    fn shared_parameters_appear_once() {
        let intensity = Parameter::new("intensity", 1.0).range(0.9, 1.05);
        let mut probe_a = dummy_probe(Contrast::D2o);
        let mut probe_b = dummy_probe(Contrast::H2o);
        probe_a.intensity = intensity.clone();
        probe_b.intensity = intensity.clone();

        let problem = FitProblem::new(
            "test",
            vec![
                Experiment::new(
                    Contrast::D2o,
                    two_layer_stack("d2o", 6.34),
                    probe_a,
                    0.5,
                    false,
                ),
                Experiment::new(
                    Contrast::H2o,
                    two_layer_stack("h2o", -0.56),
                    probe_b,
                    0.5,
                    false,
                ),
            ],
        );

        let shared: Vec<_> = problem
            .parameters()
            .into_iter()
            .filter(|p| p.same_cell(&intensity))
            .collect();
        assert_eq!(shared.len(), 1);

        // only the ranged intensity is fittable in this tiny setup
        let fittable = problem.fittable();
        assert_eq!(fittable.len(), 1);
        assert!(fittable[0].same_cell(&intensity));
    }

    #[test]
    fn validate_flags_out_of_range_parameters() {
        let mut probe = dummy_probe(Contrast::D2o);
        probe.intensity = Parameter::new("intensity", 2.0).range(0.9, 1.05);

        let problem = FitProblem::new(
            "test",
            vec![Experiment::new(
                Contrast::D2o,
                two_layer_stack("d2o", 6.34),
                probe,
                0.5,
                false,
            )],
        );
        let err = problem.validate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_MODEL);
    }

    #[test]
    fn validate_rejects_empty_problems() {
        let problem = FitProblem::new("empty", vec![]);
        assert!(problem.validate().is_err());
    }
}
