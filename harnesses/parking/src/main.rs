//! parking — smart-parking telemetry harness.
//!
//! Drives a SUMO scenario over TraCI, redirects parking-requesting vehicles
//! to free slot lanes, records nine traffic aggregates per step to CSV, and
//! renders one chart per metric.  All parameters below can be overridden by
//! passing a TOML config file as the only argument.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use log::debug;
use serde::Deserialize;

use tsh_core::{RunConfig, load_toml};
use tsh_policy::{LaneFilter, ParkingConfig, ParkingPolicy};
use tsh_report::{load_parking_table, render_metric_charts};
use tsh_run::Harness;
use tsh_telemetry::ParkingRecorder;
use tsh_traci::{SimulatorLink, SumoConfig, TraciLink};

// ── Defaults ──────────────────────────────────────────────────────────────────

const SCENARIO: &str = "sumo_config.sumocfg";
const TOTAL_STEPS: u64 = 600;
const RECORD_INTERVAL_STEPS: u64 = 1;
const SEED: u64 = 42;
const STEP_PACING_MS: u64 = 100;

const PARKING_SLOTS: [&str; 3] = ["-251145644#0_0", "-251145644#1_0", "-269696406_0"];
const TRIGGER_LANE: &str = "parking_area";
const VEHICLE_TYPE: &str = "DEFAULT_VEHTYPE";

const OUTPUT_CSV: &str = "simulation_data.csv";
const CHART_DIR: &str = "simulation_graphs";

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct HarnessConfig {
    #[serde(default)]
    run: RunConfig,
    sumo: SumoConfig,
    policy: ParkingConfig,
    #[serde(default = "default_output_csv")]
    output_csv: PathBuf,
    #[serde(default = "default_chart_dir")]
    chart_dir: PathBuf,
}

fn default_output_csv() -> PathBuf {
    PathBuf::from(OUTPUT_CSV)
}

fn default_chart_dir() -> PathBuf {
    PathBuf::from(CHART_DIR)
}

fn default_config() -> HarnessConfig {
    HarnessConfig {
        run: RunConfig {
            total_steps:           TOTAL_STEPS,
            record_interval_steps: RECORD_INTERVAL_STEPS,
            seed:                  SEED,
            step_pacing_ms:        Some(STEP_PACING_MS),
        },
        sumo: SumoConfig::new(SCENARIO),
        policy: ParkingConfig {
            slots:        PARKING_SLOTS.iter().map(|s| s.to_string()).collect(),
            vehicle_type: Some(VEHICLE_TYPE.to_owned()),
            trigger:      LaneFilter::Exact(TRIGGER_LANE.to_owned()),
        },
        output_csv: default_output_csv(),
        chart_dir:  default_chart_dir(),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config: HarnessConfig = match std::env::args().nth(1) {
        Some(path) => load_toml(Path::new(&path))?,
        None => default_config(),
    };

    println!("=== parking — smart-parking telemetry harness ===");
    println!(
        "Scenario: {}  |  Steps: {}  |  Slots: {}  |  Seed: {}",
        config.sumo.scenario.display(),
        config.run.total_steps,
        config.policy.slots.len(),
        config.run.seed,
    );
    println!();

    let mut link = TraciLink::connect(&config.sumo)?;
    let lanes = link.lane_ids()?;
    println!("Connected; scenario exposes {} lanes", lanes.len());
    debug!("lane ids: {lanes:?}");

    let mut recorder = ParkingRecorder::new(config.policy.slots.clone());
    let polled_lanes = config.policy.slots.clone();
    let mut harness = Harness::new(
        config.run.clone(),
        link,
        ParkingPolicy::new(config.policy),
        polled_lanes,
    );

    let t0 = Instant::now();
    harness.run(&mut recorder)?;
    println!(
        "Simulation complete in {:.3} s ({} rows, {} expected)",
        t0.elapsed().as_secs_f64(),
        recorder.rows().len(),
        config.run.expected_row_count(),
    );

    recorder.flush(&config.output_csv)?;
    println!("Telemetry: {}", config.output_csv.display());

    let records = load_parking_table(&config.output_csv)?;
    let charts = render_metric_charts(&records, &config.chart_dir)?;
    println!("Rendered {} charts into {}", charts.len(), config.chart_dir.display());

    Ok(())
}
