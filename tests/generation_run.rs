// Integration tests for full primary-generation runs

use std::fs;
use std::path::PathBuf;

use ambe_source::{run, Settings};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ambe_source_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_run_writes_neutron_record() {
    let dir = scratch_dir("record");
    let output = dir.join("nested").join("generated_neutrons.csv");
    let settings = Settings {
        events: 250,
        seed: 42,
        output: Some(output.clone()),
        ..Settings::default()
    };

    let summary = run(&settings).unwrap();
    assert_eq!(summary.neutrons, 250);

    let text = fs::read_to_string(&output).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("event_id,neutron_energy_MeV"));
    let rows: Vec<(u64, f64)> = lines
        .map(|line| {
            let (id, energy) = line.split_once(',').unwrap();
            (id.parse().unwrap(), energy.parse().unwrap())
        })
        .collect();
    assert_eq!(rows.len(), 250);
    for (i, (id, energy)) in rows.iter().enumerate() {
        assert_eq!(*id, i as u64);
        assert!((0.0..=11.09).contains(energy));
    }
    let mean = rows.iter().map(|(_, e)| e).sum::<f64>() / rows.len() as f64;
    assert!((mean - summary.mean_neutron_energy).abs() < 1e-9);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_run_from_json_settings_with_custom_spectrum() {
    let dir = scratch_dir("custom");
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("settings.json");
    fs::write(
        &config,
        r#"{
            "events": 2000,
            "seed": 7,
            "output": null,
            "histogram": {"bins": 4},
            "source": {
                "position": [0.0, 0.0, 0.0],
                "spectrum": {"energy": [2.0, 6.0], "weight": [1.0, 1.0]},
                "gamma_yield": 0.0
            }
        }"#,
    )
    .unwrap();

    let settings = Settings::from_path(&config).unwrap();
    let summary = run(&settings).unwrap();
    assert_eq!(summary.gammas, 0);
    assert_eq!(summary.histogram.bins.edges(), &[2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(summary.histogram.total(), 2000);
    for fraction in summary.histogram.fractions() {
        assert!((fraction - 0.25).abs() < 0.05, "fraction {}", fraction);
    }
    assert!((summary.mean_neutron_energy - 4.0).abs() < 0.1);

    let summary_path = dir.join("summary.json");
    summary.write_json(&summary_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary_path).unwrap()).unwrap();
    assert_eq!(json["events"], 2000);
    assert_eq!(json["gammas"], 0);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_settings_file_is_io_error() {
    let missing = scratch_dir("missing").join("nope.json");
    assert!(matches!(
        Settings::from_path(&missing),
        Err(ambe_source::Error::Io(_))
    ));
}
