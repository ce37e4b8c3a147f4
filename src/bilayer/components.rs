//! Molecular fragments and lipid definitions.
//!
//! Volumes are in Å^3, neutron scattering lengths in Å. The DOPC numbers
//! follow the standard molecular-group decomposition: two oleoyl chains
//! (terminal methyls counted separately) under a phosphatidylcholine
//! headgroup.

/// A molecular fragment: partial volume + coherent neutron scattering length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub name: &'static str,
    /// Partial molecular volume (Å^3).
    pub volume: f64,
    /// Coherent neutron scattering length (Å).
    pub scattering_length: f64,
}

/// A headgroup fragment with an extent along the membrane normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Headgroup {
    pub component: Component,
    /// Box length along z (Å).
    pub length: f64,
}

/// Terminal methyl (CH3) of an acyl chain.
pub fn methyl() -> Component {
    Component {
        name: "methyl",
        volume: 49.4,
        scattering_length: -4.575e-5,
    }
}

/// Oleoyl chain (18:1), terminal methyl excluded.
pub fn oleoyl() -> Component {
    Component {
        name: "oleoyl",
        volume: 413.1,
        scattering_length: -8.775e-5,
    }
}

/// Phosphatidylcholine headgroup.
pub fn pc_headgroup() -> Headgroup {
    Headgroup {
        component: Component {
            name: "PC headgroup",
            volume: 330.0,
            scattering_length: 6.0012e-4,
        },
        length: 9.575,
    }
}

/// A lipid: headgroup + acyl tails + terminal methyls.
#[derive(Debug, Clone)]
pub struct Lipid {
    pub name: &'static str,
    pub headgroup: Headgroup,
    pub tails: Vec<Component>,
    pub methyls: Vec<Component>,
}

impl Lipid {
    pub fn new(
        name: &'static str,
        headgroup: Headgroup,
        tails: Vec<Component>,
        methyls: Vec<Component>,
    ) -> Self {
        Self {
            name,
            headgroup,
            tails,
            methyls,
        }
    }

    /// 1,2-dioleoyl-sn-glycero-3-phosphocholine.
    pub fn dopc() -> Self {
        Self::new(
            "DOPC",
            pc_headgroup(),
            vec![oleoyl(), oleoyl()],
            vec![methyl(), methyl()],
        )
    }

    /// Hydrocarbon volume per lipid, terminal methyls excluded (Å^3).
    pub fn hydrocarbon_volume(&self) -> f64 {
        self.tails.iter().map(|c| c.volume).sum()
    }

    /// Hydrocarbon scattering length per lipid, terminal methyls excluded (Å).
    pub fn hydrocarbon_scattering(&self) -> f64 {
        self.tails.iter().map(|c| c.scattering_length).sum()
    }

    /// Terminal methyl volume per lipid (Å^3).
    pub fn methyl_volume(&self) -> f64 {
        self.methyls.iter().map(|c| c.volume).sum()
    }

    /// Terminal methyl scattering length per lipid (Å).
    pub fn methyl_scattering(&self) -> f64 {
        self.methyls.iter().map(|c| c.scattering_length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dopc_aggregates_match_the_chain_decomposition() {
        let dopc = Lipid::dopc();
        // Two oleoyl chains plus two terminal methyls make up the full
        // 925 Å^3 acyl region.
        let total = dopc.hydrocarbon_volume() + dopc.methyl_volume();
        assert!((total - 925.0).abs() < 1e-9);
        assert!((dopc.hydrocarbon_volume() - 826.2).abs() < 1e-9);

        let total_b = dopc.hydrocarbon_scattering() + dopc.methyl_scattering();
        assert!((total_b - (-2.67e-4)).abs() < 1e-12);
    }

    #[test]
    fn pc_headgroup_has_positive_contrast_against_chains() {
        let hg = pc_headgroup();
        let nsld_hg = hg.component.scattering_length / hg.component.volume;
        let nsld_chain = oleoyl().scattering_length / oleoyl().volume;
        assert!(nsld_hg > nsld_chain);
    }
}
