use thiserror::Error;
use tsh_traci::TraciError;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("run configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Traci(#[from] TraciError),
}

pub type RunResult<T> = Result<T, RunError>;
