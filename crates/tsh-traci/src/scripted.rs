//! `ScriptedLink` — an in-memory [`SimulatorLink`] that replays canned steps.
//!
//! Used by loop-level tests and dry runs: each `advance_step` moves a cursor
//! through a pre-built script, and queries answer from the step under the
//! cursor.  Issued reroute commands are recorded, not simulated — asserting
//! on them is the point.

use std::collections::HashMap;

use tsh_core::VehicleSnapshot;

use crate::link::SimulatorLink;
use crate::{TraciError, TraciResult};

/// The simulator state to expose for one step.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStep {
    pub vehicles:    Vec<VehicleSnapshot>,
    pub lane_counts: HashMap<String, u32>,
}

impl ScriptedStep {
    pub fn new(vehicles: Vec<VehicleSnapshot>) -> Self {
        Self { vehicles, lane_counts: HashMap::new() }
    }

    pub fn with_lane_count(mut self, lane: &str, count: u32) -> Self {
        self.lane_counts.insert(lane.to_owned(), count);
        self
    }
}

/// Replays a fixed script of steps.
pub struct ScriptedLink {
    steps:  Vec<ScriptedStep>,
    cursor: Option<usize>,
    /// Every `change_target` issued, in order: `(vehicle, edge)`.
    pub issued: Vec<(String, String)>,
    /// Set once `close` has been called.
    pub closed: bool,
}

impl ScriptedLink {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self { steps, cursor: None, issued: Vec::new(), closed: false }
    }

    fn current(&self) -> TraciResult<&ScriptedStep> {
        let idx = self
            .cursor
            .ok_or_else(|| TraciError::Protocol("query before first advance_step".to_owned()))?;
        Ok(&self.steps[idx])
    }
}

impl SimulatorLink for ScriptedLink {
    fn advance_step(&mut self) -> TraciResult<()> {
        if self.closed {
            return Err(TraciError::Closed);
        }
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.steps.len() {
            return Err(TraciError::ScriptExhausted { step: next as u64 });
        }
        self.cursor = Some(next);
        Ok(())
    }

    fn list_vehicles(&mut self) -> TraciResult<Vec<String>> {
        Ok(self.current()?.vehicles.iter().map(|v| v.id.clone()).collect())
    }

    fn vehicle_state(&mut self, id: &str) -> TraciResult<VehicleSnapshot> {
        self.current()?
            .vehicles
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| TraciError::Protocol(format!("unknown vehicle {id}")))
    }

    fn lane_vehicle_count(&mut self, lane: &str) -> TraciResult<u32> {
        Ok(self.current()?.lane_counts.get(lane).copied().unwrap_or(0))
    }

    fn lane_ids(&mut self) -> TraciResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .steps
            .iter()
            .flat_map(|s| s.lane_counts.keys().cloned())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    fn change_target(&mut self, vehicle: &str, edge: &str) -> TraciResult<()> {
        self.issued.push((vehicle.to_owned(), edge.to_owned()));
        Ok(())
    }

    fn close(&mut self) -> TraciResult<()> {
        self.closed = true;
        Ok(())
    }
}
