//! Solid-supported bilayer assembly.
//!
//! The membrane sits on a solid substrate: substrate box, optional oxide box,
//! a submembrane water gap, then inner headgroup / inner chains / two methyl
//! boxes / outer chains / outer headgroup. `set` recomputes the derived
//! geometry from the current fit parameter values; `profile` renders the
//! occupied area and scattering length per grid step.
//!
//! Geometry conventions:
//!
//! - the area available per lipid (`normarea`) is fixed by the outer leaflet,
//!   `normarea = V_ohc / l_ohc`
//! - the inner leaflet is scaled to fill the same area even when its chain
//!   length differs
//! - methyl box lengths are proportional to their volume share of the leaflet
//! - the bilayer volume fraction enters as each group's number fraction
//! - the grid wraps at z = 0: mass in the (unphysical) z < 0 tail of the
//!   substrate box is mirrored back onto the grid

use rayon::prelude::*;

use crate::bilayer::components::Lipid;
use crate::bilayer::groups::BoxGroup;

/// Substrate box length (Å). The substrate proper is semi-infinite; this box
/// only anchors the profile and must stay well inside the grid.
pub const SUBSTRATE_LENGTH: f64 = 20.0;

/// Fixed roughness of the wrapped substrate lower edge (Å).
const SUBSTRATE_LOWER_SIGMA: f64 = 2.0;

/// Current fit-parameter values driving the bilayer geometry.
///
/// All SLDs are in absolute Å^-2 units; lengths in Å.
#[derive(Debug, Clone, Copy)]
pub struct BilayerInputs {
    /// Bilayer roughness applied to every membrane group edge.
    pub sigma: f64,
    /// Substrate (and oxide) surface roughness.
    pub global_rough: f64,
    /// Substrate SLD (Å^-2).
    pub rho_substrate: f64,
    /// Oxide SLD (Å^-2).
    pub rho_oxide: f64,
    /// Oxide thickness (Å); zero disables the oxide box.
    pub l_oxide: f64,
    /// Water gap between substrate surface and inner headgroup (Å).
    pub l_submembrane: f64,
    /// Inner leaflet hydrocarbon thickness (Å).
    pub l_lipid_inner: f64,
    /// Outer leaflet hydrocarbon thickness (Å).
    pub l_lipid_outer: f64,
    /// Volume fraction of the surface covered by bilayer.
    pub vf_bilayer: f64,
}

/// Area/scattering profile of the assembled groups on a z-grid.
#[derive(Debug, Clone)]
pub struct BilayerProfile {
    /// Area normalization (Å^2): the full area available to the groups.
    pub normarea: f64,
    /// Occupied area per grid point (Å^2), capped at `normarea`.
    pub area: Vec<f64>,
    /// Scattering length per grid step (Å^-1 * step).
    pub nsl: Vec<f64>,
}

impl BilayerProfile {
    /// Fill the unoccupied volume fraction with solvent and return the SLD
    /// profile (Å^-2).
    pub fn solvent_filled(&self, stepsize: f64, bulknsld: f64) -> Vec<f64> {
        self.area
            .iter()
            .zip(self.nsl.iter())
            .map(|(&area, &nsl)| {
                nsl / (self.normarea * stepsize) + (1.0 - area / self.normarea) * bulknsld
            })
            .collect()
    }
}

/// A solid-supported lipid bilayer as a set of error-function boxes.
#[derive(Debug, Clone)]
pub struct SolidSupportedBilayer {
    substrate: BoxGroup,
    oxide: BoxGroup,
    headgroup_inner: BoxGroup,
    hc_inner: BoxGroup,
    methyl_inner: BoxGroup,
    methyl_outer: BoxGroup,
    hc_outer: BoxGroup,
    headgroup_outer: BoxGroup,
    normarea: f64,

    // per-lipid composition, fixed at construction
    v_hc: f64,
    b_hc: f64,
    v_methyl: f64,
    b_methyl: f64,
    v_headgroup: f64,
    b_headgroup: f64,
    l_headgroup: f64,
}

impl SolidSupportedBilayer {
    pub fn new(lipid: &Lipid) -> Self {
        let mut substrate = BoxGroup::empty();
        substrate.l = SUBSTRATE_LENGTH;
        substrate.z0 = 0.5 * SUBSTRATE_LENGTH;
        substrate.sigma1 = SUBSTRATE_LOWER_SIGMA;
        substrate.nf = 1.0;

        Self {
            substrate,
            oxide: BoxGroup::empty(),
            headgroup_inner: BoxGroup::empty(),
            hc_inner: BoxGroup::empty(),
            methyl_inner: BoxGroup::empty(),
            methyl_outer: BoxGroup::empty(),
            hc_outer: BoxGroup::empty(),
            headgroup_outer: BoxGroup::empty(),
            normarea: 0.0,
            v_hc: lipid.hydrocarbon_volume(),
            b_hc: lipid.hydrocarbon_scattering(),
            v_methyl: lipid.methyl_volume(),
            b_methyl: lipid.methyl_scattering(),
            v_headgroup: lipid.headgroup.component.volume,
            b_headgroup: lipid.headgroup.component.scattering_length,
            l_headgroup: lipid.headgroup.length,
        }
    }

    /// Recompute all derived group geometry from the current parameter values.
    pub fn set(&mut self, p: &BilayerInputs) {
        let vf = p.vf_bilayer.clamp(0.0, 1.0);

        // Outer leaflet fixes the area per lipid.
        let l_ohc = p.l_lipid_outer;
        self.normarea = self.v_hc / l_ohc;

        self.hc_outer = BoxGroup {
            z0: 0.0,
            l: l_ohc,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_hc,
            nsl: self.b_hc,
            nf: vf,
        };
        let l_om = l_ohc * self.v_methyl / self.v_hc;
        self.methyl_outer = BoxGroup {
            z0: 0.0,
            l: l_om,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_methyl,
            nsl: self.b_methyl,
            nf: vf,
        };

        // Inner leaflet scales its occupancy to fill the same area.
        let l_ihc = p.l_lipid_inner;
        let fill_inner = self.normarea * l_ihc / self.v_hc;
        self.hc_inner = BoxGroup {
            z0: 0.0,
            l: l_ihc,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_hc,
            nsl: self.b_hc,
            nf: vf * fill_inner,
        };
        let l_im = l_ihc * self.v_methyl / self.v_hc;
        self.methyl_inner = BoxGroup {
            z0: 0.0,
            l: l_im,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_methyl,
            nsl: self.b_methyl,
            nf: vf * fill_inner,
        };

        self.headgroup_inner = BoxGroup {
            z0: 0.0,
            l: self.l_headgroup,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_headgroup,
            nsl: self.b_headgroup,
            nf: vf * fill_inner,
        };
        self.headgroup_outer = BoxGroup {
            z0: 0.0,
            l: self.l_headgroup,
            sigma1: p.sigma,
            sigma2: p.sigma,
            vol: self.v_headgroup,
            nsl: self.b_headgroup,
            nf: vf,
        };

        // Substrate and oxide are scaled to cover the whole normalization area.
        self.substrate.vol = self.normarea * self.substrate.l;
        self.substrate.nsl = p.rho_substrate * self.substrate.vol;
        self.substrate.sigma1 = SUBSTRATE_LOWER_SIGMA;
        self.substrate.sigma2 = p.global_rough;

        self.oxide = BoxGroup {
            z0: self.substrate_top() + 0.5 * p.l_oxide,
            l: p.l_oxide,
            sigma1: p.global_rough,
            sigma2: p.global_rough,
            vol: self.normarea * p.l_oxide,
            nsl: p.rho_oxide * self.normarea * p.l_oxide,
            nf: 1.0,
        };

        // Stack the membrane groups bottom-up from the oxide surface.
        let hc_inner_center = self.substrate_top()
            + p.l_oxide
            + p.l_submembrane
            + self.l_headgroup
            + 0.5 * l_ihc;
        self.hc_inner.z0 = hc_inner_center;
        self.headgroup_inner.z0 = hc_inner_center - 0.5 * l_ihc - 0.5 * self.l_headgroup;
        self.methyl_inner.z0 = hc_inner_center + 0.5 * (l_ihc + l_im);
        self.methyl_outer.z0 = self.methyl_inner.z0 + 0.5 * (l_im + l_om);
        self.hc_outer.z0 = self.methyl_outer.z0 + 0.5 * (l_om + l_ohc);
        self.headgroup_outer.z0 = self.hc_outer.z0 + 0.5 * l_ohc + 0.5 * self.l_headgroup;
    }

    /// Top of the substrate box: the solid surface the membrane sits on.
    pub fn substrate_top(&self) -> f64 {
        self.substrate.upper()
    }

    /// Area normalization from the most recent `set`.
    pub fn normarea(&self) -> f64 {
        self.normarea
    }

    /// Center of the methyl trough (the bilayer midplane).
    pub fn midplane(&self) -> f64 {
        0.5 * (self.methyl_inner.z0 + self.methyl_outer.z0)
    }

    fn groups(&self) -> [&BoxGroup; 8] {
        [
            &self.substrate,
            &self.oxide,
            &self.headgroup_inner,
            &self.hc_inner,
            &self.methyl_inner,
            &self.methyl_outer,
            &self.hc_outer,
            &self.headgroup_outer,
        ]
    }

    /// Render area and scattering-length-per-step profiles on the z-grid.
    ///
    /// Overfilled points (area beyond `normarea`, possible at group overlaps
    /// for extreme roughness values) are rescaled so composition is preserved.
    pub fn profile(&self, z: &[f64], stepsize: f64) -> BilayerProfile {
        let columns: Vec<(f64, f64)> = z
            .par_iter()
            .map(|&z| {
                let mut area = 0.0;
                let mut nsl = 0.0;
                for g in self.groups() {
                    // wrap at z = 0: mirror the below-grid tail back in
                    let a = g.area(z) + g.area(-z);
                    area += a;
                    nsl += a * g.nsld() * stepsize;
                }
                if area > self.normarea {
                    let scale = self.normarea / area;
                    (self.normarea, nsl * scale)
                } else {
                    (area, nsl)
                }
            })
            .collect();

        let (area, nsl) = columns.into_iter().unzip();
        BilayerProfile {
            normarea: self.normarea,
            area,
            nsl,
        }
    }
}
