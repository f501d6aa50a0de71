//! Error types for tsh-telemetry.

use thiserror::Error;

/// Errors that can occur when flushing telemetry to disk.
///
/// Output I/O failure is fatal to the run — there is no partial-write
/// recovery; the caller surfaces the error and exits.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, TelemetryError>`.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
