//! The DOPC-on-TiOx co-refinement model.
//!
//! This module is the concrete experiment description: every fit parameter
//! with its range, the materials, the per-contrast layer stacks, the probes,
//! and the assembled problem. Everything else in the crate is machinery;
//! this is the science.
//!
//! Layout conventions:
//!
//! - stacks are built substrate -> surface: silicon | siox | tiox |
//!   bilayer profile | bulk solvent
//! - the beam enters through the substrate, so probes set
//!   `back_reflectivity`
//! - quantities shared between the two contrasts (structure, beam setup)
//!   are shared parameter cells; per-dataset quantities (solvent SLD,
//!   background) are independent cells

use std::cell::RefCell;
use std::rc::Rc;

use crate::bilayer::{BilayerInputs, Lipid, SolidSupportedBilayer};
use crate::domain::{Contrast, ModelSettings};
use crate::error::AppError;
use crate::fit::{Experiment, FitProblem};
use crate::io::load_reflectivity;
use crate::params::Parameter;
use crate::probe::Probe;
use crate::sample::{FunctionalLayer, Material, Slab, Stack, SLD_SCALE};

pub const PROBLEM_NAME: &str = "DOPC bilayer on TiOx substrate";

/// Structural fit parameters of the bilayer profile.
#[derive(Debug, Clone)]
pub struct BilayerParams {
    pub vf_bilayer: Parameter,
    pub l_lipid_inner: Parameter,
    pub l_lipid_outer: Parameter,
    pub sigma: Parameter,
    pub global_rough: Parameter,
    pub l_submembrane: Parameter,
}

impl BilayerParams {
    pub fn new() -> Self {
        Self {
            vf_bilayer: Parameter::new("volume_fraction_bilayer", 0.9).range(0.0, 1.0),
            l_lipid_inner: Parameter::new("inner_acyl_chain_thickness", 10.0).range(8.0, 16.0),
            l_lipid_outer: Parameter::new("outer_acyl_chain_thickness", 10.0).range(8.0, 16.0),
            sigma: Parameter::new("bilayer_roughness", 5.0).range(2.0, 9.0),
            global_rough: Parameter::new("tiox_roughness", 5.0).range(2.0, 9.0),
            l_submembrane: Parameter::new("submembrane_thickness", 10.0).range(0.0, 50.0),
        }
    }

    pub fn all(&self) -> Vec<Parameter> {
        vec![
            self.vf_bilayer.clone(),
            self.l_lipid_inner.clone(),
            self.l_lipid_outer.clone(),
            self.sigma.clone(),
            self.global_rough.clone(),
            self.l_submembrane.clone(),
        ]
    }
}

impl Default for BilayerParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Bulk materials with their density parameters.
#[derive(Debug, Clone)]
pub struct Materials {
    pub d2o: Material,
    pub h2o: Material,
    pub tiox: Material,
    pub siox: Material,
    pub silicon: Material,
}

impl Materials {
    pub fn new() -> Self {
        Self {
            d2o: Material::new("d2o", Parameter::new("rho_solv_0", 6.34).range(5.3, 6.5)),
            h2o: Material::new("h2o", Parameter::new("rho_solv_1", -0.56).range(-0.6, 0.6)),
            tiox: Material::new(
                "tiox",
                Parameter::new("rho_tiox", -1.15829).range(-2.15829, -0.15829),
            ),
            siox: Material::new("siox", Parameter::new("rho_siox", 3.5).range(3.1, 5.1)),
            silicon: Material::fixed("silicon", 2.069, 0.0),
        }
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}

/// The bilayer composition state shared by both contrasts.
///
/// One `SolidSupportedBilayer` instance backs both functional layers: `set`
/// is idempotent in the parameter values, so evaluation order between
/// contrasts does not matter.
#[derive(Clone)]
pub struct BilayerModel {
    pub params: BilayerParams,
    pub materials: Materials,
    blm: Rc<RefCell<SolidSupportedBilayer>>,
}

impl BilayerModel {
    pub fn new() -> Self {
        Self {
            params: BilayerParams::new(),
            materials: Materials::new(),
            blm: Rc::new(RefCell::new(SolidSupportedBilayer::new(&Lipid::dopc()))),
        }
    }

    /// The bilayer SLD-profile layer for one contrast.
    ///
    /// The profile function reads the current parameter values, scales SLDs
    /// from the 1e-6 Å^-2 parameter units into absolute units for the
    /// composition math, fills the unoccupied fraction with the contrast's
    /// solvent, and scales back on return.
    pub fn functional_layer(&self, contrast: Contrast, settings: &ModelSettings) -> FunctionalLayer {
        let bulk_rho = match contrast {
            Contrast::D2o => self.materials.d2o.rho.clone(),
            Contrast::H2o => self.materials.h2o.rho.clone(),
        };
        let substrate_rho = self.materials.tiox.rho.clone();
        let p = self.params.clone();
        let blm = Rc::clone(&self.blm);
        let stepsize = settings.stepsize;

        let mut deps = p.all();
        deps.push(bulk_rho.clone());
        deps.push(substrate_rho.clone());

        let profile = {
            let bulk_rho = bulk_rho.clone();
            move |z: &[f64]| -> Vec<f64> {
                let inputs = BilayerInputs {
                    sigma: p.sigma.value(),
                    global_rough: p.global_rough.value(),
                    rho_substrate: substrate_rho.value() * SLD_SCALE,
                    // no separate oxide between tiox and membrane in this model
                    rho_oxide: 0.0,
                    l_oxide: 0.0,
                    l_submembrane: p.l_submembrane.value(),
                    l_lipid_inner: p.l_lipid_inner.value(),
                    l_lipid_outer: p.l_lipid_outer.value(),
                    vf_bilayer: p.vf_bilayer.value(),
                };
                let mut blm = blm.borrow_mut();
                blm.set(&inputs);
                let rendered = blm.profile(z, stepsize);
                rendered
                    .solvent_filled(stepsize, bulk_rho.value() * SLD_SCALE)
                    .into_iter()
                    .map(|rho| rho / SLD_SCALE)
                    .collect()
            }
        };

        FunctionalLayer::new(
            format!("{} bilayer", contrast.display_name()),
            settings.dimension,
            settings.stepsize,
            deps,
            Rc::new(profile),
        )
    }
}

impl Default for BilayerModel {
    fn default() -> Self {
        Self::new()
    }
}

/// The uniform layers, shared between both contrast stacks.
#[derive(Debug, Clone)]
pub struct ModelLayers {
    pub silicon: Slab,
    pub siox: Slab,
    pub tiox: Slab,
    pub solvent_d2o: Slab,
    pub solvent_h2o: Slab,
}

impl ModelLayers {
    pub fn new(materials: &Materials) -> Self {
        let siox_interface = Parameter::new("siox_interface", 5.0).range(2.0, 9.0);

        // Si and SiOx roughnesses are the same
        let silicon = Slab::semi_infinite(materials.silicon.clone(), siox_interface.clone());

        let siox = Slab::new(
            materials.siox.clone(),
            Parameter::new("siox_thickness", 30.0).range(5.0, 40.0),
            siox_interface,
        );

        // The tiox/water interface roughness lives inside the profile
        // function (tiox_roughness), so the slab boundary itself is sharp.
        let tiox = Slab::new(
            materials.tiox.clone(),
            Parameter::new("tiox_thickness", 100.0).range(66.379, 266.38),
            Parameter::fixed("tiox interface", 0.0),
        );

        let solvent_d2o = Slab::semi_infinite(
            materials.d2o.clone(),
            Parameter::fixed("d2o interface", 5.0),
        );
        let solvent_h2o = Slab::semi_infinite(
            materials.h2o.clone(),
            Parameter::fixed("h2o interface", 5.0),
        );

        Self {
            silicon,
            siox,
            tiox,
            solvent_d2o,
            solvent_h2o,
        }
    }
}

/// Build both contrast stacks from shared layers and per-contrast profiles.
pub fn samples(
    model: &BilayerModel,
    layers: &ModelLayers,
    settings: &ModelSettings,
) -> (Stack, Stack) {
    let sample_d2o = Stack::new()
        .slab(layers.silicon.clone())
        .slab(layers.siox.clone())
        .slab(layers.tiox.clone())
        .functional(model.functional_layer(Contrast::D2o, settings))
        .slab(layers.solvent_d2o.clone());

    let sample_h2o = Stack::new()
        .slab(layers.silicon.clone())
        .slab(layers.siox.clone())
        .slab(layers.tiox.clone())
        .functional(model.functional_layer(Contrast::H2o, settings))
        .slab(layers.solvent_h2o.clone());

    (sample_d2o, sample_h2o)
}

/// Load both datasets and attach the instrumental corrections.
pub fn probes(settings: &ModelSettings, materials: &Materials) -> Result<(Probe, Probe), AppError> {
    let data_d2o = load_reflectivity(&settings.d2o_path)?;
    let data_h2o = load_reflectivity(&settings.h2o_path)?;

    let mut probe_d2o = Probe::new(Contrast::D2o, data_d2o, true);
    let mut probe_h2o = Probe::new(Contrast::H2o, data_h2o, true);

    // Beam setup is common to both measurements; backgrounds are not.
    let intensity = Parameter::new("intensity", 1.0).range(0.9, 1.05);
    let theta_offset = Parameter::new("theta_offset", 0.0).range(-0.015, 0.005);
    let sample_broadening = Parameter::new("sample_broadening", 0.0).range(-0.005, 0.02);

    probe_d2o.background = Parameter::new("background_0", 0.0).range(-1e-7, 1e-5);
    probe_h2o.background = Parameter::new("background_1", 0.0).range(-1e-7, 1e-5);
    probe_d2o.intensity = intensity.clone();
    probe_h2o.intensity = intensity;
    probe_d2o.theta_offset = theta_offset.clone();
    probe_h2o.theta_offset = theta_offset;
    probe_d2o.sample_broadening = sample_broadening.clone();
    probe_h2o.sample_broadening = sample_broadening;

    // The D2O dataset has a total-reflection edge worth oversampling.
    probe_d2o.critical_edge(&materials.silicon, &materials.d2o);

    Ok((probe_d2o, probe_h2o))
}

/// Assemble the full two-contrast co-refinement problem.
pub fn build_problem(settings: &ModelSettings) -> Result<FitProblem, AppError> {
    let model = BilayerModel::new();
    let layers = ModelLayers::new(&model.materials);
    let (sample_d2o, sample_h2o) = samples(&model, &layers, settings);
    let (probe_d2o, probe_h2o) = probes(settings, &model.materials)?;

    let experiment_d2o = Experiment::new(
        Contrast::D2o,
        sample_d2o,
        probe_d2o,
        settings.stepsize,
        settings.step_interfaces,
    );
    let experiment_h2o = Experiment::new(
        Contrast::H2o,
        sample_h2o,
        probe_h2o,
        settings.stepsize,
        settings.step_interfaces,
    );

    Ok(FitProblem::new(
        PROBLEM_NAME,
        vec![experiment_d2o, experiment_h2o],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::{all_passed, run_checks};
    use std::fs;
    use std::path::PathBuf;

    fn write_temp_data(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("nrb-setup-{}-{name}", std::process::id()));
        fs::write(
            &path,
            "# Q R dR dQ\n\
             0.010 0.98 0.010 0.0005\n\
             0.015 0.60 0.012 0.0005\n\
             0.020 0.21 0.008 0.0006\n",
        )
        .unwrap();
        path
    }

    fn test_settings() -> ModelSettings {
        ModelSettings {
            d2o_path: write_temp_data("sim1.dat"),
            h2o_path: write_temp_data("sim0.dat"),
            ..ModelSettings::default()
        }
    }

    #[test]
    fn problem_validates_and_passes_all_checks() {
        let settings = test_settings();
        let problem = build_problem(&settings).unwrap();
        problem.validate().unwrap();

        let outcomes = run_checks(&problem);
        assert!(all_passed(&outcomes), "{outcomes:?}");

        fs::remove_file(&settings.d2o_path).ok();
        fs::remove_file(&settings.h2o_path).ok();
    }

    #[test]
    fn fittable_vector_has_the_expected_parameters() {
        let settings = test_settings();
        let problem = build_problem(&settings).unwrap();
        let fittable = problem.fittable();
        let names: Vec<String> = fittable.iter().map(|p| p.name()).collect();

        // 6 bilayer + 4 densities + 3 geometry + 2 backgrounds + 3 shared
        // beam corrections
        assert_eq!(fittable.len(), 18, "{names:?}");
        for expected in [
            "volume_fraction_bilayer",
            "inner_acyl_chain_thickness",
            "outer_acyl_chain_thickness",
            "bilayer_roughness",
            "tiox_roughness",
            "submembrane_thickness",
            "rho_solv_0",
            "rho_solv_1",
            "rho_tiox",
            "rho_siox",
            "tiox_thickness",
            "siox_thickness",
            "siox_interface",
            "background_0",
            "background_1",
            "intensity",
            "theta_offset",
            "sample_broadening",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }

        fs::remove_file(&settings.d2o_path).ok();
        fs::remove_file(&settings.h2o_path).ok();
    }

    #[test]
    fn stacks_are_substrate_first_and_share_structure() {
        let settings = test_settings();
        let problem = build_problem(&settings).unwrap();
        let experiments = problem.experiments();

        for e in experiments {
            assert_eq!(e.sample.substrate().unwrap().label(), "silicon");
            assert_eq!(e.sample.len(), 5);
        }
        assert_eq!(experiments[0].sample.surface().unwrap().label(), "d2o");
        assert_eq!(experiments[1].sample.surface().unwrap().label(), "h2o");

        // the tiox slab thickness is the same cell in both stacks
        let tiox_a = experiments[0].sample.layers()[2].thickness();
        let tiox_b = experiments[1].sample.layers()[2].thickness();
        assert!(tiox_a.same_cell(tiox_b));

        // silicon interface == siox interface (one roughness cell)
        let silicon = &experiments[0].sample.layers()[0];
        let siox = &experiments[0].sample.layers()[1];
        assert!(silicon.interface().same_cell(siox.interface()));

        fs::remove_file(&settings.d2o_path).ok();
        fs::remove_file(&settings.h2o_path).ok();
    }

    #[test]
    fn profile_starts_at_the_substrate_and_ends_in_solvent() {
        let settings = ModelSettings::default();
        let model = BilayerModel::new();
        let layer = model.functional_layer(Contrast::D2o, &settings);
        let rho = layer.evaluate().unwrap();

        // wall is solid tiox
        assert!((rho[0] - model.materials.tiox.rho.value()).abs() < 0.01);
        // far end is bulk d2o
        let far = *rho.last().unwrap();
        assert!((far - model.materials.d2o.rho.value()).abs() < 1e-6);
    }

    #[test]
    fn contrasts_differ_only_through_the_solvent() {
        let settings = ModelSettings::default();
        let model = BilayerModel::new();
        let d2o = model
            .functional_layer(Contrast::D2o, &settings)
            .evaluate()
            .unwrap();
        let h2o = model
            .functional_layer(Contrast::H2o, &settings)
            .evaluate()
            .unwrap();

        // solid wall: only the roughness-tail solvent fraction differs
        assert!((d2o[0] - h2o[0]).abs() < 0.01);
        // solvent region: split by the contrast
        assert!((d2o.last().unwrap() - 6.34).abs() < 1e-6);
        assert!((h2o.last().unwrap() - (-0.56)).abs() < 1e-6);
    }

    #[test]
    fn d2o_probe_gets_the_critical_edge() {
        let settings = test_settings();
        let problem = build_problem(&settings).unwrap();
        let experiments = problem.experiments();

        assert!(experiments[0].probe.critical.is_some());
        assert!(experiments[1].probe.critical.is_none());
        assert!(experiments.iter().all(|e| e.probe.back_reflectivity));

        fs::remove_file(&settings.d2o_path).ok();
        fs::remove_file(&settings.h2o_path).ok();
    }
}
