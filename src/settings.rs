use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{
    ambe_neutron_spectrum, AMBE_GAMMA_ENERGY_MEV, AMBE_GAMMA_YIELD, AMBE_SOURCE_POSITION_CM,
};
use crate::error::{Error, Result};
use crate::particle::ParticleKind;
use crate::source::{CompositeSource, SourceEmission};
use crate::spectrum::{SpectrumSampler, SpectrumTable};
use crate::stats::{AngularDistribution, EnergyDistribution};

/// Run settings, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_events")]
    pub events: u64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub source: SourceSettings,
    /// Neutron record CSV; `None` skips writing it
    #[serde(default = "default_output")]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub histogram: HistogramSettings,
}

/// Neutron spectrum plus an optional accompanying gamma line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Emission point in cm
    #[serde(default = "default_position")]
    pub position: [f64; 3],
    /// Neutron spectrum in MeV; the built-in AmBe table when absent
    #[serde(default)]
    pub spectrum: Option<SpectrumTable>,
    #[serde(default = "default_gamma_energy")]
    pub gamma_energy: f64,
    #[serde(default = "default_gamma_yield")]
    pub gamma_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramSettings {
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_events() -> u64 {
    1000
}

fn default_seed() -> u64 {
    1
}

fn default_output() -> Option<PathBuf> {
    Some(PathBuf::from("generated_neutrons.csv"))
}

fn default_position() -> [f64; 3] {
    AMBE_SOURCE_POSITION_CM
}

fn default_gamma_energy() -> f64 {
    AMBE_GAMMA_ENERGY_MEV
}

fn default_gamma_yield() -> f64 {
    AMBE_GAMMA_YIELD
}

fn default_bins() -> usize {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            events: default_events(),
            seed: default_seed(),
            source: SourceSettings::default(),
            output: default_output(),
            histogram: HistogramSettings::default(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            position: default_position(),
            spectrum: None,
            gamma_energy: default_gamma_energy(),
            gamma_yield: default_gamma_yield(),
        }
    }
}

impl Default for HistogramSettings {
    fn default() -> Self {
        Self {
            bins: default_bins(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.events == 0 {
            return Err(Error::InvalidSettings("events must be positive".to_string()));
        }
        if self.histogram.bins == 0 {
            return Err(Error::InvalidSettings(
                "histogram bins must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.source.gamma_yield) {
            return Err(Error::InvalidSettings(format!(
                "gamma yield {} outside [0, 1]",
                self.source.gamma_yield
            )));
        }
        if !self.source.gamma_energy.is_finite() || self.source.gamma_energy < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "gamma energy {} must be finite and non-negative",
                self.source.gamma_energy
            )));
        }
        Ok(())
    }
}

impl SourceSettings {
    /// Build the neutron spectrum sampler once; callers share it by `Arc`.
    pub fn build_spectrum(&self) -> Result<Arc<SpectrumSampler>> {
        let sampler = match &self.spectrum {
            Some(table) => SpectrumSampler::try_from(table.clone())?,
            None => ambe_neutron_spectrum()?,
        };
        Ok(Arc::new(sampler))
    }

    /// Assemble the source around an already-built spectrum.
    pub fn build_source(&self, spectrum: Arc<SpectrumSampler>) -> Result<CompositeSource> {
        let mut emissions = vec![SourceEmission::always(
            ParticleKind::Neutron,
            EnergyDistribution::Tabulated(spectrum),
            AngularDistribution::Isotropic,
        )];
        if self.gamma_yield > 0.0 {
            emissions.push(SourceEmission {
                kind: ParticleKind::Gamma,
                energy: EnergyDistribution::Discrete {
                    energy: self.gamma_energy,
                },
                angle: AngularDistribution::Isotropic,
                probability: self.gamma_yield,
            });
        }
        CompositeSource::new(self.position, emissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.events, 1000);
        assert_eq!(settings.source.position, [0.0, 0.0, 21.5]);
        assert_eq!(settings.output, Some(PathBuf::from("generated_neutrons.csv")));
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(
            r#"{"events": 10, "seed": 99, "output": null, "source": {"gamma_yield": 0.0}}"#,
        )
        .unwrap();
        assert_eq!(settings.events, 10);
        assert_eq!(settings.seed, 99);
        assert_eq!(settings.output, None);
        assert_eq!(settings.source.gamma_yield, 0.0);
        assert_eq!(settings.source.gamma_energy, 4.44);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(Settings::from_json(r#"{"events": 0}"#).is_err());
        assert!(Settings::from_json(r#"{"histogram": {"bins": 0}}"#).is_err());
        assert!(Settings::from_json(r#"{"source": {"gamma_yield": 1.2}}"#).is_err());
        assert!(Settings::from_json(r#"{"events": "many"}"#).is_err());
    }

    #[test]
    fn test_custom_spectrum_is_validated() {
        let settings = Settings::from_json(
            r#"{"source": {"spectrum": {"energy": [1.0, 0.5], "weight": [1.0, 1.0]}}}"#,
        )
        .unwrap();
        assert!(matches!(
            settings.source.build_spectrum(),
            Err(Error::InvalidTable(_))
        ));
    }

    #[test]
    fn test_builds_source_without_gamma() {
        let mut source = SourceSettings::default();
        source.gamma_yield = 0.0;
        let spectrum = source.build_spectrum().unwrap();
        let built = source.build_source(spectrum).unwrap();
        assert_eq!(built.emissions().len(), 1);
        assert_eq!(built.emissions()[0].kind, ParticleKind::Neutron);
    }

    #[test]
    fn test_default_source_matches_ambe_preset() {
        let source = SourceSettings::default();
        let spectrum = source.build_spectrum().unwrap();
        let built = source.build_source(Arc::clone(&spectrum)).unwrap();
        assert_eq!(built, CompositeSource::ambe(spectrum));
    }
}
