//! Uniform layers.

use crate::params::Parameter;
use crate::sample::Material;

/// A uniform layer: material + thickness + interfacial roughness (Å).
///
/// The `interface` of layer N describes the boundary between layer N and
/// layer N+1. Semi-infinite layers (substrate, bulk solvent) carry zero
/// thickness.
#[derive(Debug, Clone)]
pub struct Slab {
    pub material: Material,
    pub thickness: Parameter,
    pub interface: Parameter,
}

impl Slab {
    pub fn new(material: Material, thickness: Parameter, interface: Parameter) -> Self {
        Self {
            material,
            thickness,
            interface,
        }
    }

    /// Semi-infinite slab: zero thickness, fixed.
    pub fn semi_infinite(material: Material, interface: Parameter) -> Self {
        let thickness = Parameter::fixed(format!("{} thickness", material.name()), 0.0);
        Self::new(material, thickness, interface)
    }

    /// Parameters in report order: densities first, then geometry.
    pub fn parameters(&self) -> Vec<Parameter> {
        vec![
            self.material.rho.clone(),
            self.material.irho.clone(),
            self.thickness.clone(),
            self.interface.clone(),
        ]
    }
}
