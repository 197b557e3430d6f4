use std::sync::Arc;

use rand::Rng;

use crate::error::{Error, Result};
use crate::spectrum::SpectrumSampler;

/// Angular distribution types
#[derive(Debug, Clone, PartialEq)]
pub enum AngularDistribution {
    Isotropic,
    Monodirectional { reference_uvw: [f64; 3] },
}

impl AngularDistribution {
    /// Create a new monodirectional distribution, normalising the direction.
    pub fn new_monodirectional(u: f64, v: f64, w: f64) -> Result<Self> {
        let mag = (u * u + v * v + w * w).sqrt();
        if mag == 0.0 || !mag.is_finite() {
            return Err(Error::InvalidSource(format!(
                "direction ({}, {}, {}) cannot be normalised",
                u, v, w
            )));
        }
        Ok(Self::Monodirectional {
            reference_uvw: [u / mag, v / mag, w / mag],
        })
    }

    /// Sample a unit direction vector
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        match self {
            AngularDistribution::Isotropic => {
                let mu = 2.0 * rng.gen::<f64>() - 1.0;
                let phi = 2.0 * std::f64::consts::PI * rng.gen::<f64>();
                let sin_theta = (1.0 - mu * mu).sqrt();
                [sin_theta * phi.cos(), sin_theta * phi.sin(), mu]
            }
            AngularDistribution::Monodirectional { reference_uvw } => *reference_uvw,
        }
    }
}

/// Energy distribution of an emitted particle (MeV)
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyDistribution {
    /// Single line
    Discrete { energy: f64 },
    /// Continuous spectrum shared with every other consumer of the same table
    Tabulated(Arc<SpectrumSampler>),
}

impl EnergyDistribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            EnergyDistribution::Discrete { energy } => *energy,
            EnergyDistribution::Tabulated(sampler) => sampler.sample_with(rng),
        }
    }

    /// Expected energy of the distribution.
    pub fn mean(&self) -> f64 {
        match self {
            EnergyDistribution::Discrete { energy } => *energy,
            EnergyDistribution::Tabulated(sampler) => sampler.mean_energy(),
        }
    }

    /// Lowest and highest energy the distribution can produce.
    pub fn range(&self) -> (f64, f64) {
        match self {
            EnergyDistribution::Discrete { energy } => (*energy, *energy),
            EnergyDistribution::Tabulated(sampler) => (sampler.min_energy(), sampler.max_energy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn norm(v: [f64; 3]) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn test_monodirectional_normalises() {
        let mono = AngularDistribution::new_monodirectional(0.0, 0.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(mono.sample(&mut rng), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_monodirectional_rejects_zero_vector() {
        assert!(AngularDistribution::new_monodirectional(0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn test_isotropic_unit_and_unbiased() {
        let iso = AngularDistribution::Isotropic;
        let mut rng = StdRng::seed_from_u64(5);
        let mut sum = [0.0; 3];
        let n = 50_000;
        for _ in 0..n {
            let d = iso.sample(&mut rng);
            assert!((norm(d) - 1.0).abs() < 1e-10);
            for i in 0..3 {
                sum[i] += d[i];
            }
        }
        // each component has variance 1/3, so the mean should sit near zero
        for s in sum {
            assert!((s / n as f64).abs() < 0.02);
        }
    }

    #[test]
    fn test_discrete_energy() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = EnergyDistribution::Discrete { energy: 4.44 };
        assert_eq!(d.sample(&mut rng), 4.44);
        assert_eq!(d.mean(), 4.44);
        assert_eq!(d.range(), (4.44, 4.44));
    }

    #[test]
    fn test_tabulated_energy_shares_sampler() {
        let sampler = Arc::new(SpectrumSampler::new(vec![1.0, 3.0], vec![1.0, 1.0]).unwrap());
        let a = EnergyDistribution::Tabulated(Arc::clone(&sampler));
        let b = EnergyDistribution::Tabulated(Arc::clone(&sampler));
        assert_eq!(Arc::strong_count(&sampler), 3);

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..1000 {
            let e = a.sample(&mut rng);
            assert!((1.0..=3.0).contains(&e));
        }
        assert_eq!(b.mean(), 2.0);
        assert_eq!(b.range(), (1.0, 3.0));
    }

    #[test]
    fn test_send_sync_bounds() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<AngularDistribution>();
        assert_sync::<EnergyDistribution>();
    }
}
