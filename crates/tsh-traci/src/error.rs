//! Error types for the TraCI connection adapter.

use thiserror::Error;

/// Errors raised while talking to the external simulator.
#[derive(Debug, Error)]
pub enum TraciError {
    #[error("failed to launch simulator binary {binary:?}: {source}")]
    Launch {
        binary: String,
        source: std::io::Error,
    },

    #[error("could not connect to simulator at {addr} after {attempts} attempts")]
    Connect { addr: String, attempts: u32 },

    #[error("I/O error on control channel: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("simulator rejected command {command:#04x}: {message}")]
    Server { command: u8, message: String },

    #[error("scripted link exhausted at step {step}")]
    ScriptExhausted { step: u64 },

    #[error("session already closed")]
    Closed,
}

/// Alias for `Result<T, TraciError>`.
pub type TraciResult<T> = Result<T, TraciError>;
