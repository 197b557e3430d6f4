use std::path::PathBuf;

use clap::{Parser, ValueHint};
use tracing::info;

use ambe_source::{run, Settings};

#[derive(Debug, Parser)]
#[command(name = "ambe-source", about = "Generate AmBe source primaries from a tabulated neutron spectrum")]
struct Cli {
    /// Optional path to a JSON settings file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Override the number of events to generate.
    #[arg(long, value_name = "N")]
    events: Option<u64>,

    /// Override the master random seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the path of the neutron record CSV.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Do not write the neutron record.
    #[arg(long, conflicts_with = "output")]
    no_output: bool,

    /// Path to write the JSON run summary.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    summary: Option<PathBuf>,
}

fn main() -> ambe_source::Result<()> {
    ambe_source::init_tracing()?;

    let cli = Cli::parse();
    let mut settings = match cli.config.as_ref() {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    if let Some(events) = cli.events {
        settings.events = events;
    }
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }
    if let Some(output) = cli.output {
        settings.output = Some(output);
    }
    if cli.no_output {
        settings.output = None;
    }

    let summary = run(&settings)?;

    if let Some(path) = cli.summary.as_ref() {
        summary.write_json(path)?;
        info!(path = ?path, "wrote JSON summary");
    }

    println!("{}", summary);
    Ok(())
}
