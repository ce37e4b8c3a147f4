//! Experimental probes.
//!
//! A probe is a loaded reflectivity dataset plus the instrumental corrections
//! the fit refines alongside the structure: beam intensity, constant
//! background, angular offset, and sample-induced divergence. Corrections
//! shared between contrasts (same beamline setup) must share parameter cells;
//! the probe just holds the handles it is given.

use crate::domain::{Contrast, DatasetStats};
use crate::io::ReflData;
use crate::params::Parameter;
use crate::sample::Material;

/// Default number of oversampling points across the critical edge.
const CRITICAL_EDGE_POINTS: usize = 51;
/// Default half-width of the oversampled region, relative to Qc.
const CRITICAL_EDGE_DELTA: f64 = 0.25;

/// Oversampled Q region around the total-reflection edge.
#[derive(Debug, Clone)]
pub struct CriticalEdge {
    /// Critical momentum transfer (Å^-1).
    pub qc: f64,
    pub q_lo: f64,
    pub q_hi: f64,
    pub points: Vec<f64>,
}

/// A reflectivity dataset plus instrumental corrections.
#[derive(Debug, Clone)]
pub struct Probe {
    pub contrast: Contrast,
    pub data: ReflData,
    pub intensity: Parameter,
    pub background: Parameter,
    pub theta_offset: Parameter,
    pub sample_broadening: Parameter,
    /// Beam incident through the substrate.
    pub back_reflectivity: bool,
    pub critical: Option<CriticalEdge>,
}

impl Probe {
    /// Probe with fixed default corrections; the model setup replaces the
    /// handles with its (possibly shared) fit parameters.
    pub fn new(contrast: Contrast, data: ReflData, back_reflectivity: bool) -> Self {
        let label = contrast.display_name();
        Self {
            contrast,
            data,
            intensity: Parameter::fixed(format!("{label} intensity"), 1.0),
            background: Parameter::fixed(format!("{label} background"), 0.0),
            theta_offset: Parameter::fixed(format!("{label} theta_offset"), 0.0),
            sample_broadening: Parameter::fixed(format!("{label} sample_broadening"), 0.0),
            back_reflectivity,
            critical: None,
        }
    }

    /// Record critical-edge oversampling for the substrate/surface pair.
    ///
    /// `Qc = sqrt(16 pi (rho_surface - rho_substrate))` with SLDs in absolute
    /// Å^-2 units. Leaves the probe unchanged when the contrast is
    /// non-positive (no total reflection edge on this side).
    pub fn critical_edge(&mut self, substrate: &Material, surface: &Material) {
        let drho = surface.rho_absolute() - substrate.rho_absolute();
        if drho <= 0.0 {
            self.critical = None;
            return;
        }

        let qc = (16.0 * std::f64::consts::PI * drho).sqrt();
        let q_lo = qc * (1.0 - CRITICAL_EDGE_DELTA);
        let q_hi = qc * (1.0 + CRITICAL_EDGE_DELTA);
        let n = CRITICAL_EDGE_POINTS;
        let step = (q_hi - q_lo) / (n as f64 - 1.0);
        let points = (0..n).map(|i| q_lo + step * i as f64).collect();

        self.critical = Some(CriticalEdge {
            qc,
            q_lo,
            q_hi,
            points,
        });
    }

    /// Instrumental correction parameters, in report order.
    pub fn parameters(&self) -> Vec<Parameter> {
        vec![
            self.intensity.clone(),
            self.background.clone(),
            self.theta_offset.clone(),
            self.sample_broadening.clone(),
        ]
    }

    pub fn stats(&self) -> DatasetStats {
        self.data.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ReflPoint;
    use std::path::PathBuf;

    fn dummy_data() -> ReflData {
        ReflData {
            path: PathBuf::from("test.dat"),
            points: vec![ReflPoint {
                q: 0.01,
                r: 1.0,
                dr: 0.01,
                dq: 0.0005,
            }],
            row_errors: vec![],
            rows_read: 1,
        }
    }

    #[test]
    fn critical_edge_matches_the_contrast_formula() {
        let mut probe = Probe::new(Contrast::D2o, dummy_data(), true);
        let silicon = Material::fixed("silicon", 2.069, 0.0);
        let d2o = Material::fixed("d2o", 6.34, 0.0);
        probe.critical_edge(&silicon, &d2o);

        let edge = probe.critical.expect("positive contrast has an edge");
        let expected = (16.0 * std::f64::consts::PI * (6.34 - 2.069) * 1e-6).sqrt();
        assert!((edge.qc - expected).abs() < 1e-12);
        assert_eq!(edge.points.len(), 51);
        assert!((edge.points[0] - edge.q_lo).abs() < 1e-15);
        assert!((edge.points[50] - edge.q_hi).abs() < 1e-12);
    }

    #[test]
    fn non_positive_contrast_has_no_edge() {
        let mut probe = Probe::new(Contrast::H2o, dummy_data(), true);
        let silicon = Material::fixed("silicon", 2.069, 0.0);
        let h2o = Material::fixed("h2o", -0.56, 0.0);
        probe.critical_edge(&silicon, &h2o);
        assert!(probe.critical.is_none());
    }

    #[test]
    fn shared_correction_handles_stay_shared() {
        let mut a = Probe::new(Contrast::D2o, dummy_data(), true);
        let mut b = Probe::new(Contrast::H2o, dummy_data(), true);
        let intensity = Parameter::new("intensity", 1.0).range(0.9, 1.05);
        a.intensity = intensity.clone();
        b.intensity = intensity.clone();
        assert!(a.intensity.same_cell(&b.intensity));

        a.intensity.set(0.97);
        assert!((b.intensity.value() - 0.97).abs() < 1e-15);
    }
}
