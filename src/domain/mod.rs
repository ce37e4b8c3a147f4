//! Domain types used throughout the model builder.
//!
//! This module defines:
//!
//! - the contrast conditions (`Contrast`)
//! - run settings derived from CLI flags (`ModelSettings`)
//! - dataset statistics and profile traces shared by reporting/export
//! - check outcomes for the configuration sanity checks

pub mod types;

pub use types::*;
