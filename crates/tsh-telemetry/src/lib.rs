//! `tsh-telemetry` — per-step telemetry rows and their CSV serialization.
//!
//! A recorder is an owned, append-only row buffer that implements
//! [`RunObserver`][tsh_run::RunObserver]: it accumulates one row (or one row
//! per vehicle) at each recording step and serializes the whole ordered
//! sequence in a single `flush` at the end of the run.  Rows are never
//! mutated after they are appended.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`row`]     | [`ParkingRow`], [`ProximityRow`], column headers      |
//! | [`recorder`]| [`ParkingRecorder`], [`ProximityRecorder`]            |
//! | [`error`]   | `TelemetryError`, `TelemetryResult`                   |

pub mod error;
pub mod recorder;
pub mod row;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TelemetryError, TelemetryResult};
pub use recorder::{ParkingRecorder, ProximityRecorder};
pub use row::{MIN_WAITING_SENTINEL, PARKING_HEADERS, PROXIMITY_HEADERS, ParkingRow, ProximityRow};
