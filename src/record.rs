// CSV record of generated source neutrons

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::particle::{ParticleKind, PrimaryEvent};

pub const NEUTRON_RECORD_HEADER: &str = "event_id,neutron_energy_MeV";

/// Writes one `event_id,neutron_energy_MeV` row per generated neutron.
pub struct NeutronRecord<W: Write> {
    writer: W,
    rows: u64,
}

impl NeutronRecord<BufWriter<File>> {
    /// Create the record file, along with its parent directory if needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> NeutronRecord<W> {
    /// Wrap a writer and emit the header line.
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", NEUTRON_RECORD_HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_event(&mut self, event: &PrimaryEvent) -> Result<()> {
        for neutron in event.of_kind(ParticleKind::Neutron) {
            writeln!(self.writer, "{},{}", event.event_id, neutron.energy)?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Rows written so far, excluding the header
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
