//! Fit problem assembly.
//!
//! Responsibilities:
//!
//! - pair each sample with its probe and stepping config (`experiment`)
//! - collect experiments into a jointly-refined problem (`problem`)
//! - run the configuration sanity checks (`checks`)

pub mod checks;
pub mod experiment;
pub mod problem;

pub use checks::*;
pub use experiment::*;
pub use problem::*;
