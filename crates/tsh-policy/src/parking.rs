//! Parking assignment policy.
//!
//! For each eligible vehicle: filter the configured slot lanes down to those
//! with a zero last-step vehicle count, then pick one uniformly at random and
//! issue a retarget.  An empty candidate set is a normal outcome, not an
//! error — the vehicle simply keeps its route.
//!
//! # The same-step race
//!
//! Availability comes from the snapshot taken at the start of the step and is
//! NOT updated as commands are issued, so two vehicles assigned in the same
//! step can land on the same nominally-free slot.  The original tool behaved
//! this way (it never defined a reservation mechanism) and the behavior is
//! kept as-is.

use log::{debug, info};
use serde::Deserialize;

use tsh_core::{SimRng, StepSnapshot, VehicleSnapshot};

use crate::policy::StepPolicy;
use crate::Command;

// ── Eligibility ───────────────────────────────────────────────────────────────

/// Which lanes mark a vehicle as "requesting parking".
///
/// The original tool compared the current lane against a single literal
/// string — too narrow to match anything in a generated network.  The
/// predicate is configurable instead; `Exact` reproduces the original rule.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LaneFilter {
    /// Lane id equals the given string.
    Exact(String),
    /// Lane id starts with the given prefix (e.g. an approach edge id).
    Prefix(String),
    /// Every lane matches; gate on vehicle type alone.
    Any,
}

impl LaneFilter {
    pub fn matches(&self, lane: &str) -> bool {
        match self {
            LaneFilter::Exact(id)     => lane == id,
            LaneFilter::Prefix(p)     => lane.starts_with(p.as_str()),
            LaneFilter::Any           => true,
        }
    }
}

/// Configuration for [`ParkingPolicy`].
#[derive(Clone, Debug, Deserialize)]
pub struct ParkingConfig {
    /// Slot lane ids.  A slot is free iff its last-step vehicle count is 0.
    pub slots: Vec<String>,

    /// Only vehicles of this type request parking.  `None` gates on lane alone.
    pub vehicle_type: Option<String>,

    /// Lane predicate marking a vehicle as requesting parking.
    pub trigger: LaneFilter,
}

impl ParkingConfig {
    /// A vehicle requests parking when its type matches AND its lane matches.
    pub fn eligible(&self, vehicle: &VehicleSnapshot) -> bool {
        let type_ok = self
            .vehicle_type
            .as_deref()
            .is_none_or(|t| vehicle.vehicle_type == t);
        type_ok && self.trigger.matches(&vehicle.lane)
    }
}

/// Map a SUMO lane id to its edge id by trimming the `_<laneIndex>` suffix.
///
/// `changeTarget` takes an edge, while slot occupancy is polled per lane;
/// `"-251145644#0_0"` → `"-251145644#0"`.  Ids without a numeric suffix are
/// returned unchanged.
pub fn edge_of_lane(lane: &str) -> &str {
    match lane.rsplit_once('_') {
        Some((edge, index)) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
            edge
        }
        _ => lane,
    }
}

// ── Policy ────────────────────────────────────────────────────────────────────

/// Random-choice smart-parking heuristic.
pub struct ParkingPolicy {
    pub config: ParkingConfig,
}

impl ParkingPolicy {
    pub fn new(config: ParkingConfig) -> Self {
        Self { config }
    }

    /// Slot lanes with zero occupancy in `snapshot`, in configured order.
    pub fn free_slots<'a>(&'a self, snapshot: &StepSnapshot) -> Vec<&'a str> {
        self.config
            .slots
            .iter()
            .filter(|slot| snapshot.lane_count(slot) == Some(0))
            .map(String::as_str)
            .collect()
    }
}

impl StepPolicy for ParkingPolicy {
    fn plan(&mut self, snapshot: &StepSnapshot, rng: &mut SimRng) -> Vec<Command> {
        // One candidate set per step, shared by all requesting vehicles.
        let free = self.free_slots(snapshot);

        let mut commands = Vec::new();
        for vehicle in &snapshot.vehicles {
            if !self.config.eligible(vehicle) {
                continue;
            }
            match rng.choose(&free) {
                Some(&slot) => {
                    info!("directing vehicle {} to parking slot {slot}", vehicle.id);
                    commands.push(Command::Retarget {
                        vehicle: vehicle.id.clone(),
                        edge:    edge_of_lane(slot).to_owned(),
                    });
                }
                None => {
                    debug!("no free parking slot for vehicle {}", vehicle.id);
                }
            }
        }
        commands
    }
}
