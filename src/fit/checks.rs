//! Configuration sanity checks.
//!
//! These catch the mistakes that silently ruin a co-refinement: a range that
//! no longer brackets its value, a stack built surface-first, corrections
//! that were meant to be shared but ended up as separate cells (or the
//! reverse for the per-dataset backgrounds), and inconsistent unit scaling.

use crate::domain::CheckOutcome;
use crate::fit::FitProblem;
use crate::sample::{Layer, SLD_SCALE};

/// Run all checks; the command layer decides what a failure is worth.
pub fn run_checks(problem: &FitProblem) -> Vec<CheckOutcome> {
    vec![
        check_parameter_ranges(problem),
        check_layer_order(problem),
        check_shared_corrections(problem),
        check_independent_backgrounds(problem),
        check_sld_unit_round_trip(problem),
    ]
}

/// True when every check passed.
pub fn all_passed(outcomes: &[CheckOutcome]) -> bool {
    outcomes.iter().all(|o| o.passed)
}

fn check_parameter_ranges(problem: &FitProblem) -> CheckOutcome {
    let params = problem.parameters();
    let mut failures = Vec::new();
    for p in &params {
        if let Err(err) = p.check() {
            failures.push(err.to_string());
        }
    }
    CheckOutcome {
        name: "parameter-ranges",
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            format!("{} parameters bracket their values", params.len())
        } else {
            failures.join(" ")
        },
    }
}

fn check_layer_order(problem: &FitProblem) -> CheckOutcome {
    for experiment in problem.experiments() {
        if let Err(err) = experiment.sample.validate() {
            return CheckOutcome {
                name: "layer-order",
                passed: false,
                detail: format!(
                    "{}: {err}",
                    experiment.contrast.display_name()
                ),
            };
        }
    }
    CheckOutcome {
        name: "layer-order",
        passed: true,
        detail: "all stacks run substrate -> surface with semi-infinite ends".to_string(),
    }
}

fn check_shared_corrections(problem: &FitProblem) -> CheckOutcome {
    let experiments = problem.experiments();
    let Some((first, rest)) = experiments.split_first() else {
        return CheckOutcome {
            name: "shared-corrections",
            passed: false,
            detail: "no experiments".to_string(),
        };
    };

    let mut failures = Vec::new();
    for other in rest {
        for (label, a, b) in [
            ("intensity", &first.probe.intensity, &other.probe.intensity),
            (
                "theta_offset",
                &first.probe.theta_offset,
                &other.probe.theta_offset,
            ),
            (
                "sample_broadening",
                &first.probe.sample_broadening,
                &other.probe.sample_broadening,
            ),
        ] {
            if !a.same_cell(b) {
                failures.push(format!(
                    "{label} differs between {} and {}",
                    first.contrast.display_name(),
                    other.contrast.display_name()
                ));
            }
        }
    }

    CheckOutcome {
        name: "shared-corrections",
        passed: failures.is_empty(),
        detail: if failures.is_empty() {
            "intensity, theta_offset, sample_broadening share one cell each".to_string()
        } else {
            failures.join("; ")
        },
    }
}

fn check_independent_backgrounds(problem: &FitProblem) -> CheckOutcome {
    let experiments = problem.experiments();
    for (i, a) in experiments.iter().enumerate() {
        for b in &experiments[i + 1..] {
            if a.probe.background.same_cell(&b.probe.background) {
                return CheckOutcome {
                    name: "independent-backgrounds",
                    passed: false,
                    detail: format!(
                        "{} and {} share one background cell",
                        a.contrast.display_name(),
                        b.contrast.display_name()
                    ),
                };
            }
        }
    }
    CheckOutcome {
        name: "independent-backgrounds",
        passed: true,
        detail: "each dataset keeps its own background".to_string(),
    }
}

fn check_sld_unit_round_trip(problem: &FitProblem) -> CheckOutcome {
    let mut n = 0usize;
    for experiment in problem.experiments() {
        for layer in experiment.sample.layers() {
            if let Layer::Slab(slab) = layer {
                let rho = slab.material.rho.value();
                let restored = (rho * SLD_SCALE) / SLD_SCALE;
                let tol = rho.abs().max(1.0) * 1e-12;
                if (restored - rho).abs() > tol {
                    return CheckOutcome {
                        name: "sld-unit-round-trip",
                        passed: false,
                        detail: format!(
                            "material '{}': {rho} -> {restored} after 1e-6 scaling",
                            slab.material.name()
                        ),
                    };
                }
                n += 1;
            }
        }
    }
    CheckOutcome {
        name: "sld-unit-round-trip",
        passed: true,
        detail: format!("{n} material densities survive 1e-6 scaling"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Contrast;
    use crate::fit::Experiment;
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

    fn stack(solvent: &str, rho: f64) -> Stack {
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

    fn problem_with_shared_corrections() -> FitProblem {
        let intensity = Parameter::new("intensity", 1.0).range(0.9, 1.05);
        let theta = Parameter::new("theta_offset", 0.0).range(-0.015, 0.005);
        let broadening = Parameter::new("sample_broadening", 0.0).range(-0.005, 0.02);

        let mut a = dummy_probe(Contrast::D2o);
        let mut b = dummy_probe(Contrast::H2o);
        a.intensity = intensity.clone();
        b.intensity = intensity;
        a.theta_offset = theta.clone();
        b.theta_offset = theta;
        a.sample_broadening = broadening.clone();
        b.sample_broadening = broadening;
        a.background = Parameter::new("background_0", 0.0).range(-1e-7, 1e-5);
        b.background = Parameter::new("background_1", 0.0).range(-1e-7, 1e-5);

        FitProblem::new(
            "test",
            vec![
                Experiment::new(Contrast::D2o, stack("d2o", 6.34), a, 0.5, false),
                Experiment::new(Contrast::H2o, stack("h2o", -0.56), b, 0.5, false),
            ],
        )
    }

    #[test]
    fn well_formed_problem_passes_every_check() {
        let problem = problem_with_shared_corrections();
        let outcomes = run_checks(&problem);
        assert_eq!(outcomes.len(), 5);
        assert!(all_passed(&outcomes), "{outcomes:?}");
    }

    #[test]
    fn unshared_intensity_fails_the_sharing_check() {
        let mut problem = problem_with_shared_corrections();
        // replace one side's intensity with a fresh cell of the same name
        let broken = {
            let mut experiments = problem.experiments().to_vec();
            experiments[1].probe.intensity = Parameter::new("intensity", 1.0).range(0.9, 1.05);
            FitProblem::new("broken", experiments)
        };
        problem = broken;

        let outcomes = run_checks(&problem);
        let sharing = outcomes
            .iter()
            .find(|o| o.name == "shared-corrections")
            .unwrap();
        assert!(!sharing.passed);
    }

    #[test]
    fn shared_background_fails_the_independence_check() {
        let problem = problem_with_shared_corrections();
        let mut experiments = problem.experiments().to_vec();
        let shared = experiments[0].probe.background.clone();
        experiments[1].probe.background = shared;
        let problem = FitProblem::new("broken", experiments);

        let outcomes = run_checks(&problem);
        let independence = outcomes
            .iter()
            .find(|o| o.name == "independent-backgrounds")
            .unwrap();
        assert!(!independence.passed);
    }
}
