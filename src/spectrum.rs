// Tabulated energy spectrum sampling by inverse-CDF lookup

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::InvalidTableError;

/// Raw (energy, weight) table as it appears in data files or literal constants.
///
/// Weights are unnormalised relative probability densities at each energy point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumTable {
    pub energy: Vec<f64>,
    pub weight: Vec<f64>,
}

/// Piecewise-linear energy spectrum with a cached cumulative distribution.
///
/// The density between two tabulated points is linear in energy, so each
/// interval contributes a trapezoid `0.5 * (W_i + W_i+1) * (E_i+1 - E_i)` to the
/// cumulative distribution. The cumulative values are normalised so the last
/// entry is exactly 1.0.
///
/// The sampler is immutable once built and can be shared between threads
/// (wrap it in an `Arc` to hand it to several sources).
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSampler {
    energy: Vec<f64>,
    weight: Vec<f64>,
    cdf: Vec<f64>,
    total: f64,
}

impl SpectrumSampler {
    /// Build a sampler from energy points and their weights.
    ///
    /// # Arguments
    /// * `energy` - Strictly increasing energy points
    /// * `weight` - Non-negative weight at each energy point
    ///
    /// # Errors
    /// Returns [`InvalidTableError`] if the lengths differ, fewer than two points
    /// are given, energies are not strictly increasing, any value is non-finite,
    /// any weight is negative, or the table integrates to zero.
    pub fn new(energy: Vec<f64>, weight: Vec<f64>) -> Result<Self, InvalidTableError> {
        validate_table(&energy, &weight)?;

        let mut cdf = Vec::with_capacity(energy.len());
        cdf.push(0.0);
        let mut running = 0.0;
        for i in 0..energy.len() - 1 {
            running += 0.5 * (weight[i] + weight[i + 1]) * (energy[i + 1] - energy[i]);
            cdf.push(running);
        }

        let total = running;
        if total <= 0.0 || !total.is_finite() {
            return Err(InvalidTableError::ZeroTotalWeight);
        }

        for c in cdf.iter_mut() {
            *c /= total;
        }
        // Division can leave the last entry a few ulps off 1.0
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            energy,
            weight,
            cdf,
            total,
        })
    }

    /// Map a uniform variate onto an energy by inverting the cumulative distribution.
    ///
    /// Inputs outside [0, 1) are clamped rather than rejected: `u <= 0` (and NaN)
    /// gives the lowest energy, `u` at or above the last cumulative value gives
    /// the highest. Within an interval the energy is interpolated linearly in
    /// the cumulative value. A variate equal to a breakpoint `C_k` returns
    /// exactly `E_k`; when that breakpoint opens a zero-probability interval
    /// (`C_k == C_k+1`) the flat segment yields `E_k` without dividing by zero.
    pub fn sample(&self, u: f64) -> f64 {
        let n = self.energy.len();
        if u.is_nan() || u <= 0.0 {
            return self.energy[0];
        }
        if u >= self.cdf[n - 1] {
            return self.energy[n - 1];
        }

        // First breakpoint with cdf[j] >= u; cdf[0] = 0 < u so j >= 1,
        // and u < cdf[n - 1] keeps j <= n - 1
        let j = self.cdf.partition_point(|&c| c < u);
        // An exact hit owns the interval starting at it, otherwise u lies
        // strictly inside [cdf[j - 1], cdf[j]]
        let k = if self.cdf[j] == u { j } else { j - 1 };

        let c_lo = self.cdf[k];
        let c_hi = self.cdf[k + 1];
        if c_hi == c_lo {
            return self.energy[k];
        }
        let e_lo = self.energy[k];
        let e_hi = self.energy[k + 1];
        let e = e_lo + (e_hi - e_lo) * (u - c_lo) / (c_hi - c_lo);
        e.clamp(e_lo, e_hi)
    }

    /// Draw a uniform variate from `rng` and sample an energy with it.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample(rng.gen::<f64>())
    }

    pub fn energy(&self) -> &[f64] {
        &self.energy
    }

    pub fn weight(&self) -> &[f64] {
        &self.weight
    }

    /// Normalised cumulative distribution at each energy point.
    pub fn cdf(&self) -> &[f64] {
        &self.cdf
    }

    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    pub fn min_energy(&self) -> f64 {
        self.energy[0]
    }

    pub fn max_energy(&self) -> f64 {
        self.energy[self.energy.len() - 1]
    }

    /// Unnormalised area under the tabulated density.
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    /// Mean energy of the piecewise-linear density.
    ///
    /// For an interval [a, b] with end weights wa, wb the first moment is
    /// `(b - a) / 6 * (wa * (2a + b) + wb * (a + 2b))`.
    pub fn mean_energy(&self) -> f64 {
        let mut moment = 0.0;
        for i in 0..self.energy.len() - 1 {
            let (a, b) = (self.energy[i], self.energy[i + 1]);
            let (wa, wb) = (self.weight[i], self.weight[i + 1]);
            moment += (b - a) / 6.0 * (wa * (2.0 * a + b) + wb * (a + 2.0 * b));
        }
        moment / self.total
    }
}

impl TryFrom<SpectrumTable> for SpectrumSampler {
    type Error = InvalidTableError;

    fn try_from(table: SpectrumTable) -> Result<Self, Self::Error> {
        SpectrumSampler::new(table.energy, table.weight)
    }
}

fn validate_table(energy: &[f64], weight: &[f64]) -> Result<(), InvalidTableError> {
    if energy.len() != weight.len() {
        return Err(InvalidTableError::LengthMismatch {
            energy: energy.len(),
            weight: weight.len(),
        });
    }
    if energy.len() < 2 {
        return Err(InvalidTableError::TooFewPoints(energy.len()));
    }
    for (index, (&e, &w)) in energy.iter().zip(weight).enumerate() {
        if !e.is_finite() || !w.is_finite() {
            return Err(InvalidTableError::NonFinite { index });
        }
        if w < 0.0 {
            return Err(InvalidTableError::NegativeWeight { index, value: w });
        }
        if index > 0 && e <= energy[index - 1] {
            return Err(InvalidTableError::NonIncreasingEnergy { index, value: e });
        }
    }
    Ok(())
}
