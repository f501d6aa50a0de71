//! vanet — vehicular-communication dataset harness.
//!
//! Drives a SUMO scenario over TraCI without intervening in any route, and
//! emits one labelled row per vehicle per step: position, speed,
//! nearest-neighbor distance, and the two threshold features used as
//! training labels.  A TOML config file passed as the only argument
//! overrides the defaults below.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use serde::Deserialize;

use tsh_core::{RunConfig, load_toml};
use tsh_policy::{NoopPolicy, ProximityConfig};
use tsh_run::Harness;
use tsh_telemetry::ProximityRecorder;
use tsh_traci::{SumoConfig, TraciLink};

// ── Defaults ──────────────────────────────────────────────────────────────────

const SCENARIO: &str = "sumo_config.sumocfg";
const TOTAL_STEPS: u64 = 500;
const RECORD_INTERVAL_STEPS: u64 = 1;
const SEED: u64 = 42;

const COMMUNICATION_RANGE_M: f64 = 50.0;
const COLLISION_THRESHOLD_M: f64 = 5.0;

const OUTPUT_DIR: &str = "dataset_csv";
const OUTPUT_CSV: &str = "vanet_dataset.csv";

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct HarnessConfig {
    #[serde(default)]
    run: RunConfig,
    sumo: SumoConfig,
    proximity: ProximityConfig,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(OUTPUT_DIR)
}

fn default_config() -> HarnessConfig {
    HarnessConfig {
        run: RunConfig {
            total_steps:           TOTAL_STEPS,
            record_interval_steps: RECORD_INTERVAL_STEPS,
            seed:                  SEED,
            step_pacing_ms:        None,
        },
        sumo: SumoConfig::new(SCENARIO),
        proximity: ProximityConfig {
            communication_range: COMMUNICATION_RANGE_M,
            collision_threshold: COLLISION_THRESHOLD_M,
        },
        output_dir: default_output_dir(),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config: HarnessConfig = match std::env::args().nth(1) {
        Some(path) => load_toml(Path::new(&path))?,
        None => default_config(),
    };

    println!("=== vanet — proximity dataset harness ===");
    println!(
        "Scenario: {}  |  Steps: {}  |  Comm range: {} m  |  Collision: {} m",
        config.sumo.scenario.display(),
        config.run.total_steps,
        config.proximity.communication_range,
        config.proximity.collision_threshold,
    );
    println!();

    let link = TraciLink::connect(&config.sumo)?;
    println!("Connected");

    // No lane occupancy needed; the dataset is derived from positions alone.
    let mut recorder = ProximityRecorder::new(config.proximity);
    let mut harness = Harness::new(config.run.clone(), link, NoopPolicy, Vec::new());

    let t0 = Instant::now();
    harness.run(&mut recorder)?;
    println!(
        "Simulation complete in {:.3} s ({} rows)",
        t0.elapsed().as_secs_f64(),
        recorder.rows().len(),
    );

    std::fs::create_dir_all(&config.output_dir)?;
    let output_csv = config.output_dir.join(OUTPUT_CSV);
    recorder.flush(&output_csv)?;
    println!("Dataset: {}", output_csv.display());

    Ok(())
}
