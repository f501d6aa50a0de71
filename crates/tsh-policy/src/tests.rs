//! Unit tests for the parking and proximity policies.

use tsh_core::{Point2, Step, StepSnapshot, VehicleSnapshot};

fn veh(id: &str, lane: &str, x: f64, y: f64) -> VehicleSnapshot {
    VehicleSnapshot {
        id:           id.to_owned(),
        position:     Point2::new(x, y),
        speed:        8.0,
        waiting_time: 0.0,
        lane:         lane.to_owned(),
        vehicle_type: "DEFAULT_VEHTYPE".to_owned(),
    }
}

#[cfg(test)]
mod parking {
    use tsh_core::SimRng;

    use crate::{Command, LaneFilter, ParkingConfig, ParkingPolicy, StepPolicy, edge_of_lane};

    use super::*;

    const SLOTS: [&str; 3] = ["-251145644#0_0", "-251145644#1_0", "-269696406_0"];

    fn config(trigger: LaneFilter) -> ParkingConfig {
        ParkingConfig {
            slots:        SLOTS.iter().map(|s| s.to_string()).collect(),
            vehicle_type: Some("DEFAULT_VEHTYPE".to_owned()),
            trigger,
        }
    }

    fn snapshot_with_counts(counts: [u32; 3], vehicles: Vec<VehicleSnapshot>) -> StepSnapshot {
        let mut snap = StepSnapshot::new(Step(10));
        for (slot, count) in SLOTS.iter().zip(counts) {
            snap.lane_counts.insert(slot.to_string(), count);
        }
        snap.vehicles = vehicles;
        snap
    }

    #[test]
    fn edge_of_lane_trims_lane_index() {
        assert_eq!(edge_of_lane("-251145644#0_0"), "-251145644#0");
        assert_eq!(edge_of_lane("edge_12"), "edge");
        assert_eq!(edge_of_lane("plain"), "plain");
        assert_eq!(edge_of_lane("odd_suffix"), "odd_suffix");
    }

    #[test]
    fn lane_filter_variants() {
        assert!(LaneFilter::Exact("parking_area".into()).matches("parking_area"));
        assert!(!LaneFilter::Exact("parking_area".into()).matches("parking_area_0"));
        assert!(LaneFilter::Prefix("approach#1".into()).matches("approach#1_0"));
        assert!(LaneFilter::Any.matches("anything"));
    }

    #[test]
    fn never_assigns_an_occupied_slot() {
        // 3 slots, exactly one occupied; the choice must avoid it for any seed.
        let snap = snapshot_with_counts([0, 1, 0], vec![veh("v1", "parking_area", 0.0, 0.0)]);
        let mut policy = ParkingPolicy::new(config(LaneFilter::Exact("parking_area".into())));

        for seed in 0..64 {
            let mut rng = SimRng::new(seed);
            let commands = policy.plan(&snap, &mut rng);
            assert_eq!(commands.len(), 1);
            let Command::Retarget { vehicle, edge } = &commands[0];
            assert_eq!(vehicle, "v1");
            // Occupied slot's edge never appears; both free ones may.
            assert_ne!(edge, edge_of_lane(SLOTS[1]));
            assert!(edge == edge_of_lane(SLOTS[0]) || edge == edge_of_lane(SLOTS[2]));
        }
    }

    #[test]
    fn no_free_slot_is_not_an_error() {
        let snap = snapshot_with_counts([2, 1, 3], vec![veh("v1", "parking_area", 0.0, 0.0)]);
        let mut policy = ParkingPolicy::new(config(LaneFilter::Exact("parking_area".into())));
        let mut rng = SimRng::new(1);
        assert!(policy.plan(&snap, &mut rng).is_empty());
    }

    #[test]
    fn ineligible_vehicles_are_skipped() {
        let mut truck = veh("t1", "parking_area", 0.0, 0.0);
        truck.vehicle_type = "truck".to_owned();
        let elsewhere = veh("v2", "somewhere_else_0", 0.0, 0.0);
        let snap = snapshot_with_counts([0, 0, 0], vec![truck, elsewhere]);

        let mut policy = ParkingPolicy::new(config(LaneFilter::Exact("parking_area".into())));
        let mut rng = SimRng::new(1);
        assert!(policy.plan(&snap, &mut rng).is_empty());
    }

    #[test]
    fn type_gate_optional() {
        let mut bus = veh("b1", "approach#1_0", 0.0, 0.0);
        bus.vehicle_type = "bus".to_owned();
        let snap = snapshot_with_counts([0, 0, 0], vec![bus]);

        let mut cfg = config(LaneFilter::Prefix("approach#1".into()));
        cfg.vehicle_type = None;
        let mut policy = ParkingPolicy::new(cfg);
        let mut rng = SimRng::new(1);
        assert_eq!(policy.plan(&snap, &mut rng).len(), 1);
    }

    #[test]
    fn same_seed_same_choices() {
        let snap = snapshot_with_counts(
            [0, 0, 0],
            vec![
                veh("v1", "parking_area", 0.0, 0.0),
                veh("v2", "parking_area", 1.0, 0.0),
            ],
        );
        let mut policy = ParkingPolicy::new(config(LaneFilter::Exact("parking_area".into())));
        let a = policy.plan(&snap, &mut SimRng::new(42));
        let b = policy.plan(&snap, &mut SimRng::new(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn unpolled_slot_is_not_free() {
        // A slot with no occupancy reading must not be treated as free.
        let mut snap = StepSnapshot::new(Step(0));
        snap.vehicles = vec![veh("v1", "parking_area", 0.0, 0.0)];
        let policy = ParkingPolicy::new(config(LaneFilter::Exact("parking_area".into())));
        assert!(policy.free_slots(&snap).is_empty());
    }
}

#[cfg(test)]
mod proximity {
    use crate::{ProximityConfig, classify};

    use super::*;

    const CFG: ProximityConfig = ProximityConfig {
        communication_range: 50.0,
        collision_threshold: 5.0,
    };

    fn snapshot(vehicles: Vec<VehicleSnapshot>) -> StepSnapshot {
        let mut snap = StepSnapshot::new(Step(0));
        snap.vehicles = vehicles;
        snap
    }

    #[test]
    fn lone_vehicle_has_infinite_min_distance() {
        let snap = snapshot(vec![veh("a", "l_0", 0.0, 0.0)]);
        let rows = classify(&snap, &CFG);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].min_distance.is_infinite());
        assert!(!rows[0].in_comm_range);
        assert!(!rows[0].collision_predicted);
    }

    #[test]
    fn nearest_neighbor_is_symmetric() {
        let snap = snapshot(vec![
            veh("a", "l_0", 0.0, 0.0),
            veh("b", "l_0", 3.0, 4.0),
            veh("c", "l_0", 100.0, 100.0),
        ]);
        let rows = classify(&snap, &CFG);
        // a and b are mutually nearest at distance 5.
        assert_eq!(rows[0].min_distance, 5.0);
        assert_eq!(rows[1].min_distance, 5.0);
    }

    #[test]
    fn minimum_bounds_every_pairwise_distance() {
        let snap = snapshot(vec![
            veh("a", "l_0", 0.0, 0.0),
            veh("b", "l_0", 10.0, 0.0),
            veh("c", "l_0", 0.0, 25.0),
            veh("d", "l_0", -7.0, 3.0),
        ]);
        let rows = classify(&snap, &CFG);
        for (i, row) in rows.iter().enumerate() {
            for (j, other) in snap.vehicles.iter().enumerate() {
                if i != j {
                    let d = snap.vehicles[i].position.distance(other.position);
                    assert!(row.min_distance <= d + 1e-12);
                }
            }
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        let snap = snapshot(vec![veh("a", "l_0", 0.0, 0.0), veh("b", "l_0", 5.0, 0.0)]);
        let rows = classify(&snap, &CFG);
        assert!(rows[0].in_comm_range);
        assert!(rows[0].collision_predicted);

        let snap = snapshot(vec![veh("a", "l_0", 0.0, 0.0), veh("b", "l_0", 50.0, 0.0)]);
        let rows = classify(&snap, &CFG);
        assert!(rows[0].in_comm_range);
        assert!(!rows[0].collision_predicted);

        let snap = snapshot(vec![veh("a", "l_0", 0.0, 0.0), veh("b", "l_0", 50.1, 0.0)]);
        let rows = classify(&snap, &CFG);
        assert!(!rows[0].in_comm_range);
    }

    #[test]
    fn coincident_vehicles_have_zero_distance() {
        let snap = snapshot(vec![veh("a", "l_0", 2.0, 2.0), veh("b", "l_0", 2.0, 2.0)]);
        let rows = classify(&snap, &CFG);
        assert_eq!(rows[0].min_distance, 0.0);
        assert_eq!(rows[1].min_distance, 0.0);
        assert!(rows[0].collision_predicted);
    }

    #[test]
    fn empty_snapshot_yields_no_rows() {
        let rows = classify(&snapshot(vec![]), &CFG);
        assert!(rows.is_empty());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn index_agrees_with_pairwise_scan() {
        use tsh_core::SimRng;

        use crate::proximity::{indexed_min_distances, pairwise_min_distances};

        // A scattered fleet well above the scan cutoff, including one
        // coincident pair so the self-exclusion is exercised.
        let mut rng = SimRng::new(7);
        let mut vehicles: Vec<VehicleSnapshot> = (0..80)
            .map(|i| {
                veh(
                    &format!("v{i}"),
                    "l_0",
                    rng.gen_range(-500.0..500.0),
                    rng.gen_range(-500.0..500.0),
                )
            })
            .collect();
        vehicles.push(veh("twin", "l_0", vehicles[0].position.x, vehicles[0].position.y));

        assert_eq!(indexed_min_distances(&vehicles), pairwise_min_distances(&vehicles));
    }
}
