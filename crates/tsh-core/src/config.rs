//! Run configuration and TOML loading helpers.
//!
//! Harness binaries bake in their defaults; every config struct in the
//! workspace also derives `Deserialize` so the same values can be loaded
//! from a TOML file via [`load_toml`] when a run needs to be re-parameterised
//! without a rebuild.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{CoreError, CoreResult, Step};

/// Top-level step-loop configuration shared by both harnesses.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    /// Total steps to simulate (exclusive upper bound on the step counter).
    pub total_steps: u64,

    /// Record telemetry every N steps.  1 = every step (the default in the
    /// original tool); rows land on steps 0, N, 2N, …
    pub record_interval_steps: u64,

    /// Master RNG seed.  The same seed always produces the same slot choices.
    pub seed: u64,

    /// Optional wall-clock pause after each step, in milliseconds.
    ///
    /// Purely an observation aid; `None` (the default) runs flat out and the
    /// loop's correctness never depends on this value.
    #[serde(default)]
    pub step_pacing_ms: Option<u64>,
}

impl RunConfig {
    /// Reject configurations the step loop cannot meaningfully run.
    ///
    /// Both counters must be nonzero: a zero step budget is an empty run and
    /// a zero recording interval would never produce a row.
    pub fn validate(&self) -> CoreResult<()> {
        if self.total_steps == 0 {
            return Err(CoreError::Config("total_steps must be nonzero".to_owned()));
        }
        if self.record_interval_steps == 0 {
            return Err(CoreError::Config(
                "record_interval_steps must be nonzero".to_owned(),
            ));
        }
        Ok(())
    }

    /// The step at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Whether telemetry should be recorded at `step`.
    #[inline]
    pub fn is_record_step(&self, step: Step) -> bool {
        self.record_interval_steps > 0 && step.0.is_multiple_of(self.record_interval_steps)
    }

    /// How many rows a full run produces: floor(total / interval), plus one
    /// because recording starts at step 0 when the interval divides evenly.
    pub fn expected_row_count(&self) -> u64 {
        if self.record_interval_steps == 0 {
            return 0;
        }
        self.total_steps.div_ceil(self.record_interval_steps)
    }

    /// The pacing knob as a `Duration`, if enabled.
    #[inline]
    pub fn step_pacing(&self) -> Option<Duration> {
        self.step_pacing_ms.map(Duration::from_millis)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_steps:           600,
            record_interval_steps: 1,
            seed:                  42,
            step_pacing_ms:        None,
        }
    }
}

// ── TOML helpers ──────────────────────────────────────────────────────────────

/// Parse any `Deserialize` config type from a TOML string.
pub fn from_toml_str<T: serde::de::DeserializeOwned>(s: &str) -> CoreResult<T> {
    toml::from_str(s).map_err(|e| CoreError::Parse(e.to_string()))
}

/// Load any `Deserialize` config type from a TOML file.
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let text = std::fs::read_to_string(path)?;
    from_toml_str(&text)
}
