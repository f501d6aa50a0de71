//! report — offline comparison charts from a finished parking run.
//!
//! Usage:
//!
//! ```text
//! report <telemetry.csv> [references.json] [out_dir]
//! ```
//!
//! Reads the telemetry table written by the parking harness and a JSON file
//! of reference series from the literature, then renders one comparison
//! chart per metric that has at least one matching reference.  The bundled
//! `data/references.json` (the Paper 1 / Paper 2 series for parking
//! utilization and average speed) is used when no reference file is given.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use tsh_report::{load_parking_table, load_references, render_comparison_charts};

const DEFAULT_REFERENCES: &str = "data/references.json";
const DEFAULT_OUT_DIR: &str = "comparison_graphs";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (csv_path, refs_path, out_dir) = match args.as_slice() {
        [csv] => (csv.clone(), DEFAULT_REFERENCES.to_owned(), PathBuf::from(DEFAULT_OUT_DIR)),
        [csv, refs] => (csv.clone(), refs.clone(), PathBuf::from(DEFAULT_OUT_DIR)),
        [csv, refs, out] => (csv.clone(), refs.clone(), PathBuf::from(out)),
        _ => bail!("usage: report <telemetry.csv> [references.json] [out_dir]"),
    };

    let records = load_parking_table(Path::new(&csv_path))?;
    let references = load_references(Path::new(&refs_path))?;
    println!(
        "Loaded {} telemetry rows and {} reference series from {}",
        records.len(),
        references.len(),
        refs_path,
    );

    let charts = render_comparison_charts(&records, &references, &out_dir)?;
    if charts.is_empty() {
        println!("No reference series matched a metric column; nothing rendered");
    } else {
        println!("Rendered {} comparison charts into {}", charts.len(), out_dir.display());
    }

    Ok(())
}
