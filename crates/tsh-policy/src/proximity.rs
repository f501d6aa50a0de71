//! Proximity classification for the vehicular-communication dataset.
//!
//! For every vehicle in a snapshot, find the Euclidean distance to its
//! nearest neighbor and derive two threshold features: "within communication
//! range" and "collision predicted" (a distance cutoff, not a trajectory
//! model).  A lone vehicle has no neighbor; its minimum distance is
//! `f64::INFINITY` and both flags are false.
//!
//! The default implementation is the O(n²) pairwise scan — exact, and cheap
//! at the tens-of-vehicles scale the harness targets.  With the
//! `spatial-index` feature, fleets above a small cutoff go through an
//! R*-tree query instead; the two paths must agree exactly, and a test pins
//! that.

use serde::Deserialize;

use tsh_core::{Point2, StepSnapshot, VehicleSnapshot};

/// Thresholds for the two derived features, in metres.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ProximityConfig {
    /// Nearest-neighbor distance at or below which two vehicles can talk.
    pub communication_range: f64,
    /// Nearest-neighbor distance at or below which a collision is flagged.
    pub collision_threshold: f64,
}

/// Per-vehicle output row of the proximity policy.
#[derive(Clone, Debug, PartialEq)]
pub struct ProximityFeatures {
    pub vehicle:             String,
    pub position:            Point2,
    pub speed:               f64,
    /// Distance to the nearest other vehicle this step; `INFINITY` if alone.
    pub min_distance:        f64,
    pub in_comm_range:       bool,
    pub collision_predicted: bool,
}

/// Classify every vehicle in the snapshot.
///
/// Output order follows `snapshot.vehicles`.
pub fn classify(snapshot: &StepSnapshot, config: &ProximityConfig) -> Vec<ProximityFeatures> {
    let minima = min_distances(&snapshot.vehicles);

    snapshot
        .vehicles
        .iter()
        .zip(minima)
        .map(|(v, min_distance)| ProximityFeatures {
            vehicle:             v.id.clone(),
            position:            v.position,
            speed:               v.speed,
            min_distance,
            in_comm_range:       min_distance <= config.communication_range,
            collision_predicted: min_distance <= config.collision_threshold,
        })
        .collect()
}

// ── Nearest-neighbor search ───────────────────────────────────────────────────

/// Below this fleet size the plain scan beats building a tree, so the
/// indexed path only takes over above it.
#[cfg(feature = "spatial-index")]
const SMALL_FLEET_SCAN_LIMIT: usize = 32;

fn min_distances(vehicles: &[VehicleSnapshot]) -> Vec<f64> {
    #[cfg(feature = "spatial-index")]
    if vehicles.len() > SMALL_FLEET_SCAN_LIMIT {
        return indexed_min_distances(vehicles);
    }
    pairwise_min_distances(vehicles)
}

/// Exact pairwise scan.  The indexed path is checked against it in tests.
pub(crate) fn pairwise_min_distances(vehicles: &[VehicleSnapshot]) -> Vec<f64> {
    vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| {
            vehicles
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| v.position.distance(other.position))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

#[cfg(feature = "spatial-index")]
pub(crate) fn indexed_min_distances(vehicles: &[VehicleSnapshot]) -> Vec<f64> {
    use rstar::RTree;
    use rstar::primitives::GeomWithData;

    // Index entries carry the vehicle's slice position so a vehicle can skip
    // itself even when two vehicles share exact coordinates.
    let entries: Vec<GeomWithData<[f64; 2], usize>> = vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| GeomWithData::new([v.position.x, v.position.y], i))
        .collect();
    let tree = RTree::bulk_load(entries);

    vehicles
        .iter()
        .enumerate()
        .map(|(i, v)| {
            tree.nearest_neighbor_iter(&[v.position.x, v.position.y])
                .find(|entry| entry.data != i)
                .map(|entry| {
                    v.position
                        .distance(Point2::new(entry.geom()[0], entry.geom()[1]))
                })
                .unwrap_or(f64::INFINITY)
        })
        .collect()
}
