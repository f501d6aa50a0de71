//! Per-step simulator state snapshots.
//!
//! A [`StepSnapshot`] is the unit the step loop hands to policies and
//! recorders: everything polled from the simulator for one step, and nothing
//! else.  Snapshots are ephemeral — they are rebuilt from scratch every step
//! and never persisted, so "slot availability" has no memory across steps
//! beyond what the simulator itself retains.

use std::collections::HashMap;

use crate::{Point2, Step};

/// One vehicle's state as reported by the simulator for the current step.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSnapshot {
    /// Simulator-assigned vehicle id (opaque string).
    pub id:           String,
    /// Position in network coordinates (metres).
    pub position:     Point2,
    /// Current speed in m/s.
    pub speed:        f64,
    /// Accumulated waiting time in seconds.
    pub waiting_time: f64,
    /// Id of the lane the vehicle currently occupies.
    pub lane:         String,
    /// Vehicle type id (e.g. `DEFAULT_VEHTYPE`).
    pub vehicle_type: String,
}

/// Everything polled from the simulator for one step.
#[derive(Clone, Debug, Default)]
pub struct StepSnapshot {
    /// The step this snapshot was taken at.
    pub step: Step,
    /// All currently live vehicles, in simulator-defined order.
    /// The order is not guaranteed stable across steps.
    pub vehicles: Vec<VehicleSnapshot>,
    /// Last-step vehicle counts for the lanes the loop was asked to poll
    /// (the configured slot lanes).
    pub lane_counts: HashMap<String, u32>,
}

impl StepSnapshot {
    pub fn new(step: Step) -> Self {
        Self { step, ..Default::default() }
    }

    /// Polled vehicle count for `lane`, or `None` if it was not polled.
    #[inline]
    pub fn lane_count(&self, lane: &str) -> Option<u32> {
        self.lane_counts.get(lane).copied()
    }

    /// Look up a vehicle by id.
    pub fn vehicle(&self, id: &str) -> Option<&VehicleSnapshot> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// `true` when no vehicles are live this step.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
