//! The `SimulatorLink` trait — the polling interface over the simulator.

use tsh_core::VehicleSnapshot;

use crate::TraciResult;

/// The operations the step loop needs from a simulator session.
///
/// [`TraciLink`][crate::TraciLink] implements this over a live SUMO process;
/// [`ScriptedLink`][crate::ScriptedLink] replays canned states for tests.
///
/// All queries are read-only and side-effect-free.  Only two operations
/// mutate simulator state: [`advance_step`][Self::advance_step] (exactly one
/// discrete tick) and [`change_target`][Self::change_target] (a reroute
/// command whose effect becomes visible in later queries).
pub trait SimulatorLink {
    /// Advance the simulator by exactly one discrete step.
    fn advance_step(&mut self) -> TraciResult<()>;

    /// Ids of all currently live vehicles, in simulator-defined order.
    /// The order is not guaranteed stable across steps.
    fn list_vehicles(&mut self) -> TraciResult<Vec<String>>;

    /// Position, speed, waiting time, lane, and type for one vehicle.
    fn vehicle_state(&mut self, id: &str) -> TraciResult<VehicleSnapshot>;

    /// Number of vehicles that were on `lane` during the last step.
    fn lane_vehicle_count(&mut self, lane: &str) -> TraciResult<u32>;

    /// Ids of all lanes in the loaded network.  Diagnostic only.
    fn lane_ids(&mut self) -> TraciResult<Vec<String>>;

    /// Reroute `vehicle` so its route ends at `edge`.
    fn change_target(&mut self, vehicle: &str, edge: &str) -> TraciResult<()>;

    /// Release the session.  Idempotent; must be safe to call after an error.
    fn close(&mut self) -> TraciResult<()>;
}
