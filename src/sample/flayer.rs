//! Functional profile layers.
//!
//! A `FunctionalLayer` computes its SLD depth profile with a user function of
//! the current fit parameter values, evaluated on a uniform z-grid. The layer
//! records the parameter handles the function reads so the problem assembly
//! can enumerate them without calling the function.

use std::rc::Rc;

use crate::error::AppError;
use crate::params::Parameter;

/// Profile function: z-grid (Å) in, SLD values (1e-6 Å^-2) out.
pub type ProfileFn = dyn Fn(&[f64]) -> Vec<f64>;

#[derive(Clone)]
pub struct FunctionalLayer {
    name: String,
    pub thickness: Parameter,
    pub interface: Parameter,
    dimension: usize,
    stepsize: f64,
    params: Vec<Parameter>,
    profile: Rc<ProfileFn>,
}

impl FunctionalLayer {
    /// Build a functional layer over `dimension` steps of `stepsize` Å.
    ///
    /// `params` must list every parameter the profile function reads;
    /// thickness is fixed at `dimension * stepsize` and the layer boundary
    /// roughness at zero (roughness is the profile function's business).
    pub fn new(
        name: impl Into<String>,
        dimension: usize,
        stepsize: f64,
        params: Vec<Parameter>,
        profile: Rc<ProfileFn>,
    ) -> Self {
        let name = name.into();
        let thickness =
            Parameter::fixed(format!("{name} thickness"), dimension as f64 * stepsize);
        let interface = Parameter::fixed(format!("{name} interface"), 0.0);
        Self {
            name,
            thickness,
            interface,
            dimension,
            stepsize,
            params,
            profile,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn stepsize(&self) -> f64 {
        self.stepsize
    }

    /// The uniform evaluation grid, `z_i = i * stepsize`.
    pub fn z_grid(&self) -> Vec<f64> {
        (0..self.dimension).map(|i| i as f64 * self.stepsize).collect()
    }

    /// Parameters the profile function depends on.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = self.params.clone();
        out.push(self.thickness.clone());
        out.push(self.interface.clone());
        out
    }

    /// Evaluate the profile at current parameter values.
    pub fn evaluate(&self) -> Result<Vec<f64>, AppError> {
        let z = self.z_grid();
        let rho = (self.profile)(&z);
        if rho.len() != z.len() {
            return Err(AppError::model(format!(
                "Profile '{}' returned {} values for {} grid points.",
                self.name,
                rho.len(),
                z.len()
            )));
        }
        if let Some(bad) = rho.iter().position(|v| !v.is_finite()) {
            return Err(AppError::model(format!(
                "Profile '{}' produced a non-finite value at z={:.2} Å.",
                self.name,
                z[bad]
            )));
        }
        Ok(rho)
    }
}

impl std::fmt::Debug for FunctionalLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionalLayer")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .field("stepsize", &self.stepsize)
            .field("params", &self.params.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_and_thickness_are_consistent() {
        let layer = FunctionalLayer::new("flat", 4, 0.5, vec![], Rc::new(|z| vec![1.0; z.len()]));
        assert_eq!(layer.z_grid(), vec![0.0, 0.5, 1.0, 1.5]);
        assert!((layer.thickness.value() - 2.0).abs() < 1e-15);
        assert_eq!(layer.evaluate().unwrap(), vec![1.0; 4]);
    }

    #[test]
    fn profile_reads_current_parameter_values() {
        let level = Parameter::new("level", 2.0).range(0.0, 10.0);
        let captured = level.clone();
        let layer = FunctionalLayer::new(
            "level",
            3,
            1.0,
            vec![level.clone()],
            Rc::new(move |z| vec![captured.value(); z.len()]),
        );

        assert_eq!(layer.evaluate().unwrap(), vec![2.0, 2.0, 2.0]);
        level.set(5.0);
        assert_eq!(layer.evaluate().unwrap(), vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn non_finite_profile_is_a_model_error() {
        let layer = FunctionalLayer::new("nan", 2, 1.0, vec![], Rc::new(|z| vec![f64::NAN; z.len()]));
        let err = layer.evaluate().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_MODEL);
    }
}
