//! Fit parameters with shared-handle semantics.
//!
//! A `Parameter` is a named scalar with an optional bounded range. The
//! external optimizer mutates parameter values between model evaluations, and
//! a parameter used by several layers or experiments must be *the same
//! underlying cell* for those uses to move together during the fit.
//!
//! Cloning a `Parameter` therefore clones a handle, not the value: both
//! handles read and write the same cell. Identity (`same_cell`) is what
//! decides whether two experiments co-refine a quantity, so the problem
//! assembly deduplicates parameters by cell, never by name.
//!
//! Single-threaded by design: the model graph is built and evaluated on one
//! thread, matching the in-process mutation model of the fitting driver.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::AppError;

#[derive(Debug)]
struct ParamCell {
    name: String,
    value: f64,
    bounds: Option<(f64, f64)>,
}

/// A named scalar fit parameter. Cheap to clone; clones share one cell.
#[derive(Clone)]
pub struct Parameter {
    cell: Rc<RefCell<ParamCell>>,
}

impl Parameter {
    /// Create a parameter with no range. Call [`Parameter::range`] to make it
    /// fittable.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            cell: Rc::new(RefCell::new(ParamCell {
                name: name.into(),
                value,
                bounds: None,
            })),
        }
    }

    /// Create a parameter that stays fixed during fitting.
    pub fn fixed(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, value)
    }

    /// Attach a fit range `[lo, hi]` and return the same handle (builder style).
    pub fn range(self, lo: f64, hi: f64) -> Self {
        self.cell.borrow_mut().bounds = Some((lo, hi));
        self
    }

    pub fn name(&self) -> String {
        self.cell.borrow().name.clone()
    }

    pub fn value(&self) -> f64 {
        self.cell.borrow().value
    }

    /// Driver-side mutation; every handle to this cell observes the new value.
    pub fn set(&self, value: f64) {
        self.cell.borrow_mut().value = value;
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.cell.borrow().bounds
    }

    /// A parameter without a range is held fixed by the fitting driver.
    pub fn is_fixed(&self) -> bool {
        self.cell.borrow().bounds.is_none()
    }

    /// True when both handles refer to the same underlying cell.
    pub fn same_cell(&self, other: &Parameter) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Stable key for identity-based deduplication.
    pub fn cell_id(&self) -> usize {
        Rc::as_ptr(&self.cell) as usize
    }

    /// Validate that the range (if any) is well-formed and brackets the value.
    pub fn check(&self) -> Result<(), AppError> {
        let cell = self.cell.borrow();
        if !cell.value.is_finite() {
            return Err(AppError::model(format!(
                "Parameter '{}' has non-finite value {}.",
                cell.name, cell.value
            )));
        }
        if let Some((lo, hi)) = cell.bounds {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(AppError::model(format!(
                    "Parameter '{}' has invalid range [{lo}, {hi}].",
                    cell.name
                )));
            }
            if cell.value < lo || cell.value > hi {
                return Err(AppError::model(format!(
                    "Parameter '{}' value {} outside range [{lo}, {hi}].",
                    cell.name, cell.value
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Parameter")
            .field("name", &cell.name)
            .field("value", &cell.value)
            .field("bounds", &cell.bounds)
            .finish()
    }
}

/// Deduplicate parameters by cell identity, preserving first-seen order.
pub fn unique_parameters(params: &[Parameter]) -> Vec<Parameter> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for p in params {
        if seen.insert(p.cell_id()) {
            out.push(p.clone());
        }
    }
    out
}
