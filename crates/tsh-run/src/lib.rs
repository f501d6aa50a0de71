//! `tsh-run` — the step loop that drives one harness run.
//!
//! # Per-step sequence
//!
//! ```text
//! for step in 0..config.total_steps:
//!   ① Advance  — one simulationStep on the link (the only state mutation
//!                the harness does not initiate itself).
//!   ② Poll     — vehicle ids, per-vehicle state, polled lane occupancy,
//!                assembled into an ephemeral StepSnapshot.
//!   ③ Plan     — StepPolicy::plan(snapshot, rng) → commands.
//!   ④ Apply    — each command is issued through the link.
//!   ⑤ Observe  — on_step_end, plus on_record at the recording interval.
//!   ⑥ Pace     — optional wall-clock pause (observation aid only).
//! close        — unconditional, success or error.
//! ```
//!
//! Strictly sequential and single-threaded: a step is fully processed before
//! the next begins.  There is no retry and no cancellation; a failure at any
//! stage ends the run (after the link is closed).

pub mod error;
pub mod harness;
pub mod observer;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RunError, RunResult};
pub use harness::Harness;
pub use observer::{NoopObserver, RunObserver};
