//! Ordered layer stacks.
//!
//! Stacks are always built from the substrate up: the first layer is the
//! semi-infinite substrate and the last is the semi-infinite bulk solvent.
//! When the beam is incident from the substrate side, the probe sets
//! `back_reflectivity` instead of reordering the stack.

use crate::error::AppError;
use crate::params::Parameter;
use crate::sample::{FunctionalLayer, Slab};

/// One layer of a sample.
#[derive(Debug, Clone)]
pub enum Layer {
    Slab(Slab),
    Functional(FunctionalLayer),
}

impl Layer {
    pub fn label(&self) -> String {
        match self {
            Layer::Slab(slab) => slab.material.name().to_string(),
            Layer::Functional(layer) => layer.name().to_string(),
        }
    }

    pub fn thickness(&self) -> &Parameter {
        match self {
            Layer::Slab(slab) => &slab.thickness,
            Layer::Functional(layer) => &layer.thickness,
        }
    }

    pub fn interface(&self) -> &Parameter {
        match self {
            Layer::Slab(slab) => &slab.interface,
            Layer::Functional(layer) => &layer.interface,
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        match self {
            Layer::Slab(slab) => slab.parameters(),
            Layer::Functional(layer) => layer.parameters(),
        }
    }
}

/// An ordered composition of layers, substrate first.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append a uniform layer (builder style).
    pub fn slab(mut self, slab: Slab) -> Self {
        self.layers.push(Layer::Slab(slab));
        self
    }

    /// Append a functional profile layer (builder style).
    pub fn functional(mut self, layer: FunctionalLayer) -> Self {
        self.layers.push(Layer::Functional(layer));
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The semi-infinite substrate (first layer), when the stack is valid.
    pub fn substrate(&self) -> Option<&Layer> {
        self.layers.first()
    }

    /// The semi-infinite bulk solvent (last layer), when the stack is valid.
    pub fn surface(&self) -> Option<&Layer> {
        self.layers.last()
    }

    /// Parameters in stack order, substrate first. Duplicates are kept;
    /// identity-dedup happens at the problem level.
    pub fn parameters(&self) -> Vec<Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    /// Structural validation: at least substrate + surface, both semi-infinite
    /// uniform layers with zero thickness.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.layers.len() < 2 {
            return Err(AppError::model(format!(
                "Stack has {} layers; need at least a substrate and a bulk solvent.",
                self.layers.len()
            )));
        }

        let ends = [
            ("substrate", &self.layers[0]),
            ("surface", &self.layers[self.layers.len() - 1]),
        ];
        for (which, layer) in ends {
            match layer {
                Layer::Slab(slab) => {
                    if slab.thickness.value().abs() > 1e-12 {
                        return Err(AppError::model(format!(
                            "The {which} layer '{}' must be semi-infinite (zero thickness), got {} Å.",
                            layer.label(),
                            slab.thickness.value()
                        )));
                    }
                }
                Layer::Functional(_) => {
                    return Err(AppError::model(format!(
                        "The {which} layer must be a uniform slab, got functional layer '{}'.",
                        layer.label()
                    )));
                }
            }
        }

        Ok(())
    }
}
