//! Recorders — append-only row buffers bridged to the step loop.
//!
//! The original tool pushed rows into a process-global list; here each
//! recorder owns its buffer, is handed to [`Harness::run`] as the observer,
//! and is flushed exactly once after the run.  `flush` overwrites any
//! existing file at the target path.
//!
//! [`Harness::run`]: tsh_run::Harness::run

use std::path::Path;

use log::info;

use tsh_core::{Step, StepSnapshot};
use tsh_policy::{ProximityConfig, classify};
use tsh_run::RunObserver;

use crate::row::{PARKING_HEADERS, PROXIMITY_HEADERS, ParkingRow, ProximityRow};
use crate::TelemetryResult;

// ── ParkingRecorder ───────────────────────────────────────────────────────────

/// Accumulates one [`ParkingRow`] per recording step.
pub struct ParkingRecorder {
    /// The configured slot lane ids the aggregates are computed against.
    slots: Vec<String>,
    rows:  Vec<ParkingRow>,
}

impl ParkingRecorder {
    pub fn new(slots: Vec<String>) -> Self {
        Self { slots, rows: Vec::new() }
    }

    /// Append one row.  Rows are immutable once appended.
    pub fn record(&mut self, row: ParkingRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ParkingRow] {
        &self.rows
    }

    /// Serialize all rows to `path`, overwriting any existing file.
    pub fn flush(&self, path: &Path) -> TelemetryResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(PARKING_HEADERS)?;
        for row in &self.rows {
            writer.write_record(row.record())?;
        }
        writer.flush()?;
        info!("parking telemetry saved to {} ({} rows)", path.display(), self.rows.len());
        Ok(())
    }
}

impl RunObserver for ParkingRecorder {
    fn on_record(&mut self, _step: Step, snapshot: &StepSnapshot) {
        self.record(ParkingRow::compute(snapshot, &self.slots));
    }
}

// ── ProximityRecorder ─────────────────────────────────────────────────────────

/// Accumulates one [`ProximityRow`] per vehicle per recording step.
pub struct ProximityRecorder {
    config: ProximityConfig,
    rows:   Vec<ProximityRow>,
}

impl ProximityRecorder {
    pub fn new(config: ProximityConfig) -> Self {
        Self { config, rows: Vec::new() }
    }

    pub fn rows(&self) -> &[ProximityRow] {
        &self.rows
    }

    /// Serialize all rows to `path`, overwriting any existing file.
    pub fn flush(&self, path: &Path) -> TelemetryResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(PROXIMITY_HEADERS)?;
        for row in &self.rows {
            writer.write_record(row.record())?;
        }
        writer.flush()?;
        info!("proximity dataset saved to {} ({} rows)", path.display(), self.rows.len());
        Ok(())
    }
}

impl RunObserver for ProximityRecorder {
    fn on_record(&mut self, _step: Step, snapshot: &StepSnapshot) {
        let features = classify(snapshot, &self.config);
        self.rows.extend(features.into_iter().map(ProximityRow::from));
    }
}
