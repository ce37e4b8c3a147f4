//! Bulk materials.

use crate::params::Parameter;

/// Conversion between the conventional SLD units (1e-6 Å^-2) used by
/// parameters/reports and the absolute Å^-2 units used by the composition
/// math.
pub const SLD_SCALE: f64 = 1e-6;

/// A named material with real and imaginary scattering length density.
///
/// `rho` and `irho` are parameter handles, so two layers built from the same
/// material always share the material's densities during fitting.
#[derive(Debug, Clone)]
pub struct Material {
    name: String,
    pub rho: Parameter,
    pub irho: Parameter,
}

impl Material {
    /// Material whose real SLD is a fit parameter; `irho` is fixed at zero.
    pub fn new(name: impl Into<String>, rho: Parameter) -> Self {
        let name = name.into();
        let irho = Parameter::fixed(format!("{name} irho"), 0.0);
        Self { name, rho, irho }
    }

    /// Material with both densities held fixed.
    pub fn fixed(name: impl Into<String>, rho: f64, irho: f64) -> Self {
        let name = name.into();
        Self {
            rho: Parameter::fixed(format!("{name} rho"), rho),
            irho: Parameter::fixed(format!("{name} irho"), irho),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Real SLD in absolute Å^-2 units (scaled by 1e-6).
    pub fn rho_absolute(&self) -> f64 {
        self.rho.value() * SLD_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloned_material_shares_density_cells() {
        let d2o = Material::new("d2o", Parameter::new("rho_solv_0", 6.34).range(5.3, 6.5));
        let copy = d2o.clone();
        assert!(d2o.rho.same_cell(&copy.rho));

        copy.rho.set(6.0);
        assert!((d2o.rho.value() - 6.0).abs() < 1e-15);
    }

    #[test]
    fn unit_scaling_round_trips() {
        let tiox = Material::fixed("tiox", 2.1630, 0.0);
        let restored = tiox.rho_absolute() / SLD_SCALE;
        assert!((restored - 2.1630).abs() < 1e-12);
    }
}
