//! The `StepPolicy` trait — the extension point the step loop drives.

use tsh_core::{SimRng, StepSnapshot};

use crate::Command;

/// Pluggable per-step decision logic.
///
/// Called exactly once per step with that step's snapshot.  The injected
/// [`SimRng`] is the only source of randomness, so a seeded run is
/// reproducible command for command.
///
/// Implementations must not keep slot or vehicle state across calls:
/// availability is recomputed from each snapshot, and the simulator owns all
/// cross-step memory.
pub trait StepPolicy {
    /// Return the commands to apply for this step.  An empty `Vec` means
    /// "observe only".
    fn plan(&mut self, snapshot: &StepSnapshot, rng: &mut SimRng) -> Vec<Command>;
}

/// A [`StepPolicy`] that never issues commands.
///
/// Used by the dataset-collection harness, which only observes, and as a
/// placeholder in loop tests.
pub struct NoopPolicy;

impl StepPolicy for NoopPolicy {
    fn plan(&mut self, _snapshot: &StepSnapshot, _rng: &mut SimRng) -> Vec<Command> {
        vec![]
    }
}
