//! One modeled measurement: sample + probe + numerical stepping config.

use crate::domain::Contrast;
use crate::params::Parameter;
use crate::probe::Probe;
use crate::sample::Stack;

/// A sample/probe pairing with the solver's stepping configuration.
///
/// `dz` is the microslab step (Å) and `step_interfaces` selects between a
/// stepped interface profile and the Nevot-Croce roughness approximation.
/// Both are recorded for the external solver; nothing here interprets them.
#[derive(Debug, Clone)]
pub struct Experiment {
    pub contrast: Contrast,
    pub sample: Stack,
    pub probe: Probe,
    pub dz: f64,
    pub step_interfaces: bool,
}

impl Experiment {
    pub fn new(
        contrast: Contrast,
        sample: Stack,
        probe: Probe,
        dz: f64,
        step_interfaces: bool,
    ) -> Self {
        Self {
            contrast,
            sample,
            probe,
            dz,
            step_interfaces,
        }
    }

    /// Parameters in deterministic order: sample (substrate-first), then
    /// probe corrections. Duplicates are kept; the problem deduplicates.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = self.sample.parameters();
        out.extend(self.probe.parameters());
        out
    }
}
