//! The layered sample description.
//!
//! A sample is a `Stack` of layers ordered substrate -> surface:
//!
//! - `Material`: real/imaginary scattering length density (1e-6 Å^-2)
//! - `Slab`: material + thickness + interfacial roughness
//! - `FunctionalLayer`: a layer whose SLD depth profile is computed by a
//!   user function of fit parameters on a uniform z-grid

pub mod flayer;
pub mod material;
pub mod slab;
pub mod stack;

pub use flayer::*;
pub use material::*;
pub use slab::*;
pub use stack::*;
