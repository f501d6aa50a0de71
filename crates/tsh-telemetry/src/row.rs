//! Telemetry row types and their aggregate computation.
//!
//! Column names are kept byte-identical to the original tool's tables so
//! existing downstream notebooks keep working against the new harness.

use tsh_core::StepSnapshot;
use tsh_policy::ProximityFeatures;

/// Min waiting time when no vehicles are live: the original tool recorded
/// `float('inf')`, which survives a CSV round-trip (`"inf"` parses back to
/// `f64::INFINITY`), so the sentinel is kept rather than collapsed to 0.
pub const MIN_WAITING_SENTINEL: f64 = f64::INFINITY;

/// Header row of the parking telemetry table.
pub const PARKING_HEADERS: [&str; 9] = [
    "Time (s)",
    "Total Vehicles",
    "Parked Vehicles",
    "Parking Utilization",
    "Average Speed (m/s)",
    "Total Waiting Vehicles",
    "Total Waiting Time",
    "Max Waiting Time (s)",
    "Min Waiting Time (s)",
];

/// Header row of the proximity dataset table.
pub const PROXIMITY_HEADERS: [&str; 7] = [
    "Vehicle_ID",
    "X_Position",
    "Y_Position",
    "Speed",
    "Min_Distance",
    "In_Communication_Range",
    "Collision_Predicted",
];

// ── ParkingRow ────────────────────────────────────────────────────────────────

/// One aggregate row of the parking harness, computed from one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingRow {
    pub step:               u64,
    pub total_vehicles:     u64,
    /// Slots whose last-step vehicle count was nonzero.
    pub parked_vehicles:    u64,
    /// `parked / slot_count`, or 0 when the slot set is empty.  Always in [0, 1].
    pub utilization:        f64,
    /// Mean speed across live vehicles; 0 when none.
    pub average_speed:      f64,
    pub waiting_vehicles:   u64,
    pub total_waiting_time: f64,
    /// 0 when no vehicles are live.
    pub max_waiting_time:   f64,
    /// [`MIN_WAITING_SENTINEL`] when no vehicles are live.
    pub min_waiting_time:   f64,
}

impl ParkingRow {
    /// Aggregate one snapshot against the configured slot set.
    ///
    /// Every empty-candidate condition here is a normal data point, not an
    /// error: zero vehicles, zero free slots, and zero waiting times all
    /// produce well-defined values.
    pub fn compute(snapshot: &StepSnapshot, slots: &[String]) -> Self {
        let total_vehicles = snapshot.vehicles.len() as u64;

        let parked_vehicles = slots
            .iter()
            .filter(|slot| snapshot.lane_count(slot).unwrap_or(0) > 0)
            .count() as u64;
        let utilization = if slots.is_empty() {
            0.0
        } else {
            parked_vehicles as f64 / slots.len() as f64
        };

        let average_speed = if snapshot.vehicles.is_empty() {
            0.0
        } else {
            let sum: f64 = snapshot.vehicles.iter().map(|v| v.speed).sum();
            sum / snapshot.vehicles.len() as f64
        };

        let waiting: Vec<f64> = snapshot.vehicles.iter().map(|v| v.waiting_time).collect();
        let total_waiting_time = waiting.iter().sum();
        let max_waiting_time = waiting.iter().copied().fold(0.0, f64::max);
        let min_waiting_time = waiting
            .iter()
            .copied()
            .fold(MIN_WAITING_SENTINEL, f64::min);

        Self {
            step: snapshot.step.0,
            total_vehicles,
            parked_vehicles,
            utilization,
            average_speed,
            waiting_vehicles: waiting.len() as u64,
            total_waiting_time,
            max_waiting_time,
            min_waiting_time,
        }
    }

    /// Field values in header order, formatted for CSV.
    pub fn record(&self) -> [String; 9] {
        [
            self.step.to_string(),
            self.total_vehicles.to_string(),
            self.parked_vehicles.to_string(),
            self.utilization.to_string(),
            self.average_speed.to_string(),
            self.waiting_vehicles.to_string(),
            self.total_waiting_time.to_string(),
            self.max_waiting_time.to_string(),
            self.min_waiting_time.to_string(),
        ]
    }
}

// ── ProximityRow ──────────────────────────────────────────────────────────────

/// One vehicle-step row of the proximity dataset.
///
/// Matches the original dataset layout: no step column — rows from all
/// recorded steps are concatenated in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityRow {
    pub vehicle:             String,
    pub x:                   f64,
    pub y:                   f64,
    pub speed:               f64,
    pub min_distance:        f64,
    pub in_comm_range:       bool,
    pub collision_predicted: bool,
}

impl From<ProximityFeatures> for ProximityRow {
    fn from(f: ProximityFeatures) -> Self {
        Self {
            vehicle:             f.vehicle,
            x:                   f.position.x,
            y:                   f.position.y,
            speed:               f.speed,
            min_distance:        f.min_distance,
            in_comm_range:       f.in_comm_range,
            collision_predicted: f.collision_predicted,
        }
    }
}

impl ProximityRow {
    /// Field values in header order; booleans as `0`/`1` per the original
    /// dataset encoding.
    pub fn record(&self) -> [String; 7] {
        [
            self.vehicle.clone(),
            self.x.to_string(),
            self.y.to_string(),
            self.speed.to_string(),
            self.min_distance.to_string(),
            (self.in_comm_range as u8).to_string(),
            (self.collision_predicted as u8).to_string(),
        ]
    }
}
