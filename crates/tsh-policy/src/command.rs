//! Commands — the simulator mutations a policy can request.

/// An action produced by a [`StepPolicy`][crate::StepPolicy] and applied by
/// the step loop through the simulator link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reroute `vehicle` so its route ends at `edge`.
    Retarget { vehicle: String, edge: String },
}
