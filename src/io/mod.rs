//! Input/output helpers.
//!
//! - reflectivity data ingest + validation (`ingest`)
//! - profile CSV export (`export`)
//! - problem JSON export for the fitting driver (`problem`)

pub mod export;
pub mod ingest;
pub mod problem;

pub use export::*;
pub use ingest::*;
pub use problem::*;
