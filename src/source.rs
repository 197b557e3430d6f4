use std::sync::Arc;

use rand::Rng;

use crate::data::{AMBE_GAMMA_ENERGY_MEV, AMBE_GAMMA_YIELD, AMBE_SOURCE_POSITION_CM};
use crate::error::{Error, Result};
use crate::particle::{Particle, ParticleKind, PrimaryEvent};
use crate::spectrum::SpectrumSampler;
use crate::stats::{AngularDistribution, EnergyDistribution};

/// One kind of particle a source may emit per event.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEmission {
    pub kind: ParticleKind,
    pub energy: EnergyDistribution,
    pub angle: AngularDistribution,
    /// Probability that this particle is emitted in a given event
    pub probability: f64,
}

impl SourceEmission {
    /// Emission that happens in every event
    pub fn always(kind: ParticleKind, energy: EnergyDistribution, angle: AngularDistribution) -> Self {
        Self {
            kind,
            energy,
            angle,
            probability: 1.0,
        }
    }
}

/// Point source emitting several correlated particle kinds per event.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSource {
    /// Emission point in cm
    pub position: [f64; 3],
    emissions: Vec<SourceEmission>,
}

impl CompositeSource {
    pub fn new(position: [f64; 3], emissions: Vec<SourceEmission>) -> Result<Self> {
        if position.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidSource(format!(
                "source position {:?} is not finite",
                position
            )));
        }
        for emission in &emissions {
            if !(0.0..=1.0).contains(&emission.probability) {
                return Err(Error::InvalidSource(format!(
                    "{} emission probability {} outside [0, 1]",
                    emission.kind, emission.probability
                )));
            }
        }
        Ok(Self {
            position,
            emissions,
        })
    }

    /// AmBe source: a neutron drawn from `spectrum` in every event, plus the
    /// 4.44 MeV gamma in 60% of events, both isotropic.
    pub fn ambe(spectrum: Arc<SpectrumSampler>) -> Self {
        Self {
            position: AMBE_SOURCE_POSITION_CM,
            emissions: vec![
                SourceEmission::always(
                    ParticleKind::Neutron,
                    EnergyDistribution::Tabulated(spectrum),
                    AngularDistribution::Isotropic,
                ),
                SourceEmission {
                    kind: ParticleKind::Gamma,
                    energy: EnergyDistribution::Discrete {
                        energy: AMBE_GAMMA_ENERGY_MEV,
                    },
                    angle: AngularDistribution::Isotropic,
                    probability: AMBE_GAMMA_YIELD,
                },
            ],
        }
    }

    pub fn emissions(&self) -> &[SourceEmission] {
        &self.emissions
    }

    /// Generate the primaries of one event.
    ///
    /// Emissions are processed in order. An emission with probability 1.0
    /// is produced without drawing its acceptance variate.
    pub fn generate<R: Rng + ?Sized>(&self, event_id: u64, rng: &mut R) -> PrimaryEvent {
        let mut particles = Vec::with_capacity(self.emissions.len());
        for emission in &self.emissions {
            if emission.probability < 1.0 && rng.gen::<f64>() >= emission.probability {
                continue;
            }
            let energy = emission.energy.sample(rng);
            let direction = emission.angle.sample(rng);
            particles.push(Particle::new(emission.kind, self.position, direction, energy));
        }
        PrimaryEvent {
            event_id,
            particles,
        }
    }
}
