use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    Neutron,
    Gamma,
}

impl ParticleKind {
    /// PDG Monte Carlo particle code
    pub fn pdg_code(&self) -> i32 {
        match self {
            ParticleKind::Neutron => 2112,
            ParticleKind::Gamma => 22,
        }
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleKind::Neutron => write!(f, "neutron"),
            ParticleKind::Gamma => write!(f, "gamma"),
        }
    }
}

/// A primary particle handed to the transport code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub kind: ParticleKind,
    /// Position in cm
    pub position: [f64; 3],
    /// Unit direction vector
    pub direction: [f64; 3],
    /// Kinetic energy in MeV
    pub energy: f64,
}

impl Particle {
    pub fn new(kind: ParticleKind, position: [f64; 3], direction: [f64; 3], energy: f64) -> Self {
        Self {
            kind,
            position,
            direction,
            energy,
        }
    }
}

/// All primaries generated for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryEvent {
    pub event_id: u64,
    pub particles: Vec<Particle>,
}

impl PrimaryEvent {
    pub fn of_kind(&self, kind: ParticleKind) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.kind == kind)
    }
}
