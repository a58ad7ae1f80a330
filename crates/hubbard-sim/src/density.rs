//! Decoding outcome histograms into per-site occupation probabilities.
//!
//! Character `j` of an outcome is the spin-up orbital of site `j` and
//! character `L + j` the spin-down orbital. Each site is marginalized over
//! the rest of the chain independently, so site probabilities always sum
//! to one but joint correlations between sites are not retained.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use hubbard_hal::Counts;

use crate::error::{SimError, SimResult};

/// Occupation of a single site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupationClass {
    /// Neither orbital occupied.
    Empty,
    /// Spin-up only.
    Up,
    /// Spin-down only.
    Down,
    /// Doubly occupied.
    Both,
}

impl OccupationClass {
    /// All classes in display order.
    pub const ALL: [OccupationClass; 4] = [
        OccupationClass::Empty,
        OccupationClass::Up,
        OccupationClass::Down,
        OccupationClass::Both,
    ];

    /// Classify a site from its two orbital bits.
    pub fn from_bits(up: bool, down: bool) -> Self {
        match (up, down) {
            (false, false) => OccupationClass::Empty,
            (true, false) => OccupationClass::Up,
            (false, true) => OccupationClass::Down,
            (true, true) => OccupationClass::Both,
        }
    }

    /// Number of particles on the site.
    pub fn particles(self) -> u32 {
        match self {
            OccupationClass::Empty => 0,
            OccupationClass::Up | OccupationClass::Down => 1,
            OccupationClass::Both => 2,
        }
    }

    /// Lowercase label.
    pub fn name(self) -> &'static str {
        match self {
            OccupationClass::Empty => "empty",
            OccupationClass::Up => "up",
            OccupationClass::Down => "down",
            OccupationClass::Both => "both",
        }
    }

    fn slot(self) -> usize {
        match self {
            OccupationClass::Empty => 0,
            OccupationClass::Up => 1,
            OccupationClass::Down => 2,
            OccupationClass::Both => 3,
        }
    }
}

impl fmt::Display for OccupationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spin species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    /// Spin up.
    Up,
    /// Spin down.
    Down,
}

/// Occupation probabilities of one site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteOccupation {
    /// Site index.
    pub site: u32,
    /// P(empty).
    pub empty: f64,
    /// P(up only).
    pub up: f64,
    /// P(down only).
    pub down: f64,
    /// P(doubly occupied).
    pub both: f64,
}

impl SiteOccupation {
    fn from_tallies(site: u32, tallies: [u64; 4], total: u64) -> Self {
        let p = |n: u64| n as f64 / total as f64;
        Self {
            site,
            empty: p(tallies[0]),
            up: p(tallies[1]),
            down: p(tallies[2]),
            both: p(tallies[3]),
        }
    }

    /// Probability of `class`.
    pub fn get(&self, class: OccupationClass) -> f64 {
        match class {
            OccupationClass::Empty => self.empty,
            OccupationClass::Up => self.up,
            OccupationClass::Down => self.down,
            OccupationClass::Both => self.both,
        }
    }

    /// `(class, probability)` pairs in [`OccupationClass::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (OccupationClass, f64)> + '_ {
        OccupationClass::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of the four probabilities.
    pub fn total(&self) -> f64 {
        self.empty + self.up + self.down + self.both
    }

    /// Expected particle number `⟨n↑ + n↓⟩`.
    pub fn particle_density(&self) -> f64 {
        self.up + self.down + 2.0 * self.both
    }

    /// Expected occupation of one spin orbital.
    pub fn spin_density(&self, spin: Spin) -> f64 {
        match spin {
            Spin::Up => self.up + self.both,
            Spin::Down => self.down + self.both,
        }
    }

    /// The most probable class; ties resolve in [`OccupationClass::ALL`] order.
    pub fn most_likely(&self) -> OccupationClass {
        let mut best = OccupationClass::Empty;
        for class in OccupationClass::ALL {
            if self.get(class) > self.get(best) {
                best = class;
            }
        }
        best
    }
}

/// Per-site occupation probabilities for a whole chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationDistribution {
    sites: Vec<SiteOccupation>,
    total_shots: u64,
}

impl OccupationDistribution {
    /// Number of sites.
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Occupation of `site`, if in range.
    pub fn site(&self, site: usize) -> Option<&SiteOccupation> {
        self.sites.get(site)
    }

    /// All sites in index order.
    pub fn sites(&self) -> &[SiteOccupation] {
        &self.sites
    }

    /// Shots the distribution was estimated from.
    pub fn total_shots(&self) -> u64 {
        self.total_shots
    }

    /// Particle density profile along the chain.
    pub fn particle_density(&self) -> Vec<f64> {
        self.sites.iter().map(SiteOccupation::particle_density).collect()
    }

    /// Density profile of one spin species.
    pub fn spin_density(&self, spin: Spin) -> Vec<f64> {
        self.sites.iter().map(|s| s.spin_density(spin)).collect()
    }

    /// Expected total particle number.
    pub fn total_particles(&self) -> f64 {
        self.particle_density().iter().sum()
    }
}

/// Converts [`Counts`] into an [`OccupationDistribution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityDecoder;

impl DensityDecoder {
    /// Decode `counts` for a chain of `num_sites` sites.
    ///
    /// Every key is checked before any marginal is computed, so a single
    /// malformed outcome fails the whole call. A histogram whose total does
    /// not fit in a `u64` is rejected with [`SimError::CountOverflow`].
    pub fn decode(counts: &Counts, num_sites: u32) -> SimResult<OccupationDistribution> {
        if num_sites == 0 {
            return Err(SimError::InvalidConfiguration(
                "num_sites must be at least 1".into(),
            ));
        }
        let width = 2 * num_sites as usize;

        let mut samples = Vec::with_capacity(counts.len());
        for (bitstring, n) in counts.iter() {
            let bytes = bitstring.as_bytes();
            if bytes.len() != width || !bytes.iter().all(|b| matches!(b, b'0' | b'1')) {
                return Err(SimError::MalformedBitstring {
                    bitstring: bitstring.to_string(),
                    expected_len: width,
                });
            }
            samples.push((bytes, n));
        }

        let total = counts.checked_total_shots().ok_or(SimError::CountOverflow)?;
        if total == 0 {
            return Err(SimError::EmptySample);
        }

        debug!(
            num_sites,
            outcomes = samples.len(),
            total,
            "decoding occupation"
        );

        let marginal = |site: u32| site_marginal(&samples, num_sites, site, total);

        #[cfg(feature = "parallel")]
        let sites = {
            use rayon::prelude::*;
            (0..num_sites).into_par_iter().map(marginal).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let sites = (0..num_sites).map(marginal).collect();

        Ok(OccupationDistribution {
            sites,
            total_shots: total,
        })
    }
}

/// Occupation of `site` over already validated `samples`.
fn site_marginal(
    samples: &[(&[u8], u64)],
    num_sites: u32,
    site: u32,
    total: u64,
) -> SiteOccupation {
    let (up_idx, down_idx) = (site as usize, (num_sites + site) as usize);
    let mut tallies = [0u64; 4];
    for &(bytes, n) in samples {
        let class = OccupationClass::from_bits(bytes[up_idx] == b'1', bytes[down_idx] == b'1');
        // Each tally is a partial sum of `total`, which fits in a u64.
        tallies[class.slot()] += n;
    }
    SiteOccupation::from_tallies(site, tallies, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(OccupationClass::from_bits(false, false), OccupationClass::Empty);
        assert_eq!(OccupationClass::from_bits(true, false), OccupationClass::Up);
        assert_eq!(OccupationClass::from_bits(false, true), OccupationClass::Down);
        assert_eq!(OccupationClass::from_bits(true, true), OccupationClass::Both);
        assert_eq!(OccupationClass::Both.particles(), 2);
    }

    #[test]
    fn test_site_densities() {
        let site = SiteOccupation {
            site: 0,
            empty: 0.1,
            up: 0.2,
            down: 0.3,
            both: 0.4,
        };
        assert!((site.total() - 1.0).abs() < 1e-12);
        assert!((site.particle_density() - 1.3).abs() < 1e-12);
        assert!((site.spin_density(Spin::Up) - 0.6).abs() < 1e-12);
        assert!((site.spin_density(Spin::Down) - 0.7).abs() < 1e-12);
        assert_eq!(site.most_likely(), OccupationClass::Both);
    }

    #[test]
    fn test_class_serializes_lowercase() {
        let json = serde_json::to_string(&OccupationClass::Both).unwrap();
        assert_eq!(json, "\"both\"");
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_decode_matches_site_by_site() {
        let counts = Counts::from_pairs([
            ("100110", 7),
            ("011001", 3),
            ("111000", 11),
            ("000111", 2),
            ("101010", 5),
        ]);
        let dist = DensityDecoder::decode(&counts, 3).unwrap();

        let samples: Vec<(&[u8], u64)> = counts.iter().map(|(k, n)| (k.as_bytes(), n)).collect();
        let expected: Vec<SiteOccupation> = (0..3)
            .map(|site| site_marginal(&samples, 3, site, 28))
            .collect();
        assert_eq!(dist.sites(), expected.as_slice());
    }
}
