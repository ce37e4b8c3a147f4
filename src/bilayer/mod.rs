//! Volume-fraction bilayer composition.
//!
//! The bilayer is modeled as a set of molecular groups (substrate, optional
//! oxide, headgroups, hydrocarbon chains, terminal methyls), each an
//! error-function box occupying part of the area available per lipid. The
//! solvent fills whatever volume fraction the groups leave open.
//!
//! - `components`: molecular fragments and lipid definitions (DOPC)
//! - `groups`: the error-function box primitive
//! - `ssblm`: the solid-supported bilayer assembly

pub mod components;
pub mod groups;
pub mod ssblm;

pub use components::*;
pub use groups::*;
pub use ssblm::*;
