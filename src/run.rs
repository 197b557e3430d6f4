use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::histogram::{EnergyBins, EnergyHistogram};
use crate::particle::ParticleKind;
use crate::record::NeutronRecord;
use crate::rng::EventRng;
use crate::settings::Settings;

/// Totals of a generation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub events: u64,
    pub seed: u64,
    pub neutrons: u64,
    pub gammas: u64,
    /// Mean sampled neutron energy (MeV)
    pub mean_neutron_energy: f64,
    /// Mean of the tabulated spectrum (MeV), for comparison
    pub spectrum_mean_energy: f64,
    pub histogram: EnergyHistogram,
}

impl RunSummary {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Events: {} (seed {})", self.events, self.seed)?;
        writeln!(f, "  Neutrons: {}", self.neutrons)?;
        writeln!(f, "  Gammas: {}", self.gammas)?;
        writeln!(
            f,
            "  Mean neutron energy: {:.4} MeV (spectrum {:.4} MeV)",
            self.mean_neutron_energy, self.spectrum_mean_energy
        )?;
        write!(f, "  Histogram bins: {}", self.histogram.bins.num_bins())
    }
}

/// Generate all events described by `settings`, writing the neutron record
/// to `settings.output` when set.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    match &settings.output {
        Some(path) => {
            let mut record = NeutronRecord::create(path)?;
            let summary = generate_into(settings, Some(&mut record))?;
            record.finish()?;
            info!(path = ?path, rows = summary.neutrons, "wrote neutron record");
            Ok(summary)
        }
        None => generate_into::<std::io::Sink>(settings, None),
    }
}

/// Generate all events, writing the neutron record into `writer`.
pub fn run_with_writer<W: Write>(settings: &Settings, writer: W) -> Result<(RunSummary, W)> {
    let mut record = NeutronRecord::new(writer)?;
    let summary = generate_into(settings, Some(&mut record))?;
    Ok((summary, record.finish()?))
}

fn generate_into<W: Write>(
    settings: &Settings,
    mut record: Option<&mut NeutronRecord<W>>,
) -> Result<RunSummary> {
    settings.validate()?;

    let spectrum = settings.source.build_spectrum()?;
    let spectrum_mean_energy = spectrum.mean_energy();
    let bins = EnergyBins::uniform(
        spectrum.min_energy(),
        spectrum.max_energy(),
        settings.histogram.bins,
    )?;
    let source = settings.source.build_source(spectrum)?;

    info!(
        events = settings.events,
        seed = settings.seed,
        emissions = source.emissions().len(),
        "starting primary generation"
    );

    let mut histogram = EnergyHistogram::new(bins);
    let mut neutrons = 0u64;
    let mut gammas = 0u64;
    let mut energy_sum = 0.0;

    for event_id in 0..settings.events {
        let mut rng = EventRng::for_event(settings.seed, event_id);
        let event = source.generate(event_id, &mut rng);

        for particle in &event.particles {
            match particle.kind {
                ParticleKind::Neutron => {
                    neutrons += 1;
                    energy_sum += particle.energy;
                    histogram.fill(particle.energy);
                }
                ParticleKind::Gamma => gammas += 1,
            }
        }
        if let Some(record) = record.as_deref_mut() {
            record.write_event(&event)?;
        }
        if (event_id + 1) % 100_000 == 0 {
            debug!(events = event_id + 1, "generated events");
        }
    }

    let mean_neutron_energy = if neutrons > 0 {
        energy_sum / neutrons as f64
    } else {
        0.0
    };

    info!(
        neutrons,
        gammas,
        mean_neutron_energy,
        "finished primary generation"
    );

    Ok(RunSummary {
        events: settings.events,
        seed: settings.seed,
        neutrons,
        gammas,
        mean_neutron_energy,
        spectrum_mean_energy,
        histogram,
    })
}
