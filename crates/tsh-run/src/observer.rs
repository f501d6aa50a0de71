//! Run observer trait for progress reporting and telemetry collection.

use tsh_core::{Step, StepSnapshot};

/// Callbacks invoked by [`Harness::run`][crate::Harness::run] at key points
/// in the step loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Telemetry recorders hook
/// [`on_record`][Self::on_record]; progress printers usually hook
/// [`on_step_end`][Self::on_step_end].
pub trait RunObserver {
    /// Called after the simulator has advanced, before the snapshot is taken.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after policy commands for this step have been applied.
    ///
    /// `commands_issued` is how many commands the policy produced this step.
    fn on_step_end(&mut self, _step: Step, _snapshot: &StepSnapshot, _commands_issued: usize) {}

    /// Called at the recording interval (`step % record_interval_steps == 0`),
    /// after [`on_step_end`][Self::on_step_end] for the same step.
    fn on_record(&mut self, _step: Step, _snapshot: &StepSnapshot) {}

    /// Called once after the final step completes, before the link is closed.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`RunObserver`] that does nothing.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}
