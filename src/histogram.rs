use serde::Serialize;

use crate::error::{Error, Result};

/// Energy bin edges [E0, E1, ..., En] defining bins [E0, E1), ..., [En-1, En].
///
/// The last edge is inclusive so the top of a spectrum lands in the final bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyBins {
    edges: Vec<f64>,
}

impl EnergyBins {
    /// Create bins from edges, which must be strictly ascending and at least 2.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidSettings(
                "energy bins need at least 2 edges".to_string(),
            ));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::InvalidSettings(
                "energy bin edges must be finite".to_string(),
            ));
        }
        for i in 1..edges.len() {
            if edges[i] <= edges[i - 1] {
                return Err(Error::InvalidSettings(format!(
                    "energy bin edges must be strictly ascending (edge {} = {})",
                    i, edges[i]
                )));
            }
        }
        Ok(Self { edges })
    }

    /// `n` equal-width bins spanning [min, max].
    pub fn uniform(min: f64, max: f64, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidSettings("bin count must be positive".to_string()));
        }
        let width = (max - min) / n as f64;
        let mut edges: Vec<f64> = (0..n).map(|i| min + width * i as f64).collect();
        edges.push(max);
        Self::new(edges)
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Index of the bin containing `energy`, or None outside the edges.
    pub fn bin(&self, energy: f64) -> Option<usize> {
        let last = self.edges.len() - 1;
        if energy.is_nan() || energy < self.edges[0] || energy > self.edges[last] {
            return None;
        }
        if energy == self.edges[last] {
            return Some(last - 1);
        }
        // number of edges <= energy, minus one
        Some(self.edges.partition_point(|&edge| edge <= energy) - 1)
    }
}

/// Counting histogram over [`EnergyBins`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyHistogram {
    pub bins: EnergyBins,
    pub counts: Vec<u64>,
    pub underflow: u64,
    pub overflow: u64,
    /// NaN energies, kept out of both the bins and the out-of-range counts
    pub invalid: u64,
}

impl EnergyHistogram {
    pub fn new(bins: EnergyBins) -> Self {
        let counts = vec![0; bins.num_bins()];
        Self {
            bins,
            counts,
            underflow: 0,
            overflow: 0,
            invalid: 0,
        }
    }

    pub fn fill(&mut self, energy: f64) {
        if energy.is_nan() {
            self.invalid += 1;
            return;
        }
        match self.bins.bin(energy) {
            Some(i) => self.counts[i] += 1,
            None if energy < self.bins.edges[0] => self.underflow += 1,
            None => self.overflow += 1,
        }
    }

    /// Entries inside the bin range
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of in-range entries falling in each bin.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f64 / total as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_creation() {
        let bins = EnergyBins::new(vec![0.0, 1.0, 10.0, 20.0]).unwrap();
        assert_eq!(bins.num_bins(), 3);
    }

    #[test]
    fn test_bins_too_few_edges() {
        assert!(EnergyBins::new(vec![1.0]).is_err());
    }

    #[test]
    fn test_bins_non_ascending() {
        assert!(EnergyBins::new(vec![1.0, 10.0, 5.0]).is_err());
        assert!(EnergyBins::new(vec![1.0, 10.0, 10.0, 20.0]).is_err());
    }

    #[test]
    fn test_bin_lookup() {
        let bins = EnergyBins::new(vec![0.0, 1.0, 10.0, 20.0]).unwrap();
        assert_eq!(bins.bin(0.0), Some(0));
        assert_eq!(bins.bin(0.5), Some(0));
        assert_eq!(bins.bin(1.0), Some(1));
        assert_eq!(bins.bin(15.0), Some(2));
        assert_eq!(bins.bin(20.0), Some(2));
        assert_eq!(bins.bin(-0.1), None);
        assert_eq!(bins.bin(20.1), None);
        assert_eq!(bins.bin(f64::NAN), None);
    }

    #[test]
    fn test_uniform_bins() {
        let bins = EnergyBins::uniform(0.0, 10.0, 4).unwrap();
        assert_eq!(bins.edges(), &[0.0, 2.5, 5.0, 7.5, 10.0]);
        assert!(EnergyBins::uniform(0.0, 10.0, 0).is_err());
    }

    #[test]
    fn test_histogram_fill() {
        let mut h = EnergyHistogram::new(EnergyBins::uniform(0.0, 2.0, 2).unwrap());
        for e in [0.1, 0.9, 1.5, 2.0, -1.0, 3.0, 3.5] {
            h.fill(e);
        }
        assert_eq!(h.counts, vec![2, 2]);
        assert_eq!(h.underflow, 1);
        assert_eq!(h.overflow, 2);
        assert_eq!(h.invalid, 0);
        assert_eq!(h.total(), 4);
        assert_eq!(h.fractions(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_nan_is_counted_as_invalid() {
        let mut h = EnergyHistogram::new(EnergyBins::uniform(0.0, 2.0, 2).unwrap());
        h.fill(f64::NAN);
        h.fill(1.5);
        assert_eq!(h.invalid, 1);
        assert_eq!(h.overflow, 0);
        assert_eq!(h.underflow, 0);
        assert_eq!(h.counts, vec![0, 1]);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn test_empty_fractions() {
        let h = EnergyHistogram::new(EnergyBins::uniform(0.0, 1.0, 3).unwrap());
        assert_eq!(h.fractions(), vec![0.0; 3]);
    }
}
