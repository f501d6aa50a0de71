//! Unit tests for the TraCI codec and the scripted link.

#[cfg(test)]
mod protocol {
    use crate::protocol::*;
    use crate::TraciError;

    #[test]
    fn command_short_framing() {
        let cmd = encode_command(CMD_SIMSTEP, &[1, 2, 3]);
        // length byte counts itself and the id.
        assert_eq!(cmd, vec![5, CMD_SIMSTEP, 1, 2, 3]);
    }

    #[test]
    fn command_extended_framing() {
        let content = vec![0u8; 300];
        let cmd = encode_command(CMD_GET_VEHICLE_VARIABLE, &content);
        assert_eq!(cmd[0], 0);
        let ext = i32::from_be_bytes([cmd[1], cmd[2], cmd[3], cmd[4]]);
        assert_eq!(ext as usize, 300 + 2 + 4);
        assert_eq!(cmd[5], CMD_GET_VEHICLE_VARIABLE);
        assert_eq!(cmd.len(), 6 + 300);
    }

    #[test]
    fn message_length_prefix() {
        let msg = encode_message(&[encode_command(CMD_CLOSE, &[])]);
        let total = i32::from_be_bytes([msg[0], msg[1], msg[2], msg[3]]);
        assert_eq!(total as usize, msg.len());
        assert_eq!(msg.len(), 4 + 2);
    }

    #[test]
    fn writer_reader_round_trip() {
        let mut w = ByteWriter::new();
        w.write_u8(7)
            .write_i32(-42)
            .write_f64(1.5)
            .write_string("veh_0");
        let bytes = w.into_bytes();

        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.read_i32().unwrap(), -42);
        assert_eq!(r.read_f64().unwrap(), 1.5);
        assert_eq!(r.read_string().unwrap(), "veh_0");
        assert!(r.is_empty());
    }

    #[test]
    fn string_list_round_trip() {
        let mut w = ByteWriter::new();
        w.write_i32(3);
        for s in ["a", "bb", "ccc"] {
            w.write_string(s);
        }
        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes);
        assert_eq!(r.read_string_list().unwrap(), ["a", "bb", "ccc"]);
    }

    #[test]
    fn header_short_and_extended() {
        let short = encode_command(0x02, &[9, 9]);
        let mut r = ByteReader::new(&short);
        assert_eq!(read_command_header(&mut r).unwrap(), (0x02, 2));

        let big = encode_command(0xb4, &vec![0u8; 400]);
        let mut r = ByteReader::new(&big);
        assert_eq!(read_command_header(&mut r).unwrap(), (0xb4, 400));
    }

    #[test]
    fn truncated_read_is_protocol_error() {
        let mut r = ByteReader::new(&[0, 0]);
        match r.read_i32() {
            Err(TraciError::Protocol(_)) => {}
            other => panic!("expected protocol error, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod scripted {
    use std::collections::HashMap;

    use tsh_core::{Point2, VehicleSnapshot};

    use crate::{ScriptedLink, ScriptedStep, SimulatorLink, TraciError};

    fn veh(id: &str, x: f64) -> VehicleSnapshot {
        VehicleSnapshot {
            id:           id.to_owned(),
            position:     Point2::new(x, 0.0),
            speed:        10.0,
            waiting_time: 0.0,
            lane:         "e1_0".to_owned(),
            vehicle_type: "DEFAULT_VEHTYPE".to_owned(),
        }
    }

    fn two_step_link() -> ScriptedLink {
        ScriptedLink::new(vec![
            ScriptedStep::new(vec![veh("a", 0.0)]).with_lane_count("slot_0", 0),
            ScriptedStep::new(vec![veh("a", 5.0), veh("b", 50.0)]).with_lane_count("slot_0", 1),
        ])
    }

    #[test]
    fn advance_then_query() {
        let mut link = two_step_link();
        link.advance_step().unwrap();
        assert_eq!(link.list_vehicles().unwrap(), ["a"]);
        assert_eq!(link.lane_vehicle_count("slot_0").unwrap(), 0);

        link.advance_step().unwrap();
        assert_eq!(link.list_vehicles().unwrap(), ["a", "b"]);
        assert_eq!(link.lane_vehicle_count("slot_0").unwrap(), 1);
        assert_eq!(link.vehicle_state("b").unwrap().position.x, 50.0);
    }

    #[test]
    fn query_before_advance_fails() {
        let mut link = two_step_link();
        assert!(link.list_vehicles().is_err());
    }

    #[test]
    fn exhausting_the_script() {
        let mut link = two_step_link();
        link.advance_step().unwrap();
        link.advance_step().unwrap();
        match link.advance_step() {
            Err(TraciError::ScriptExhausted { step: 2 }) => {}
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn unpolled_lane_counts_as_zero() {
        let mut link = two_step_link();
        link.advance_step().unwrap();
        assert_eq!(link.lane_vehicle_count("nowhere_0").unwrap(), 0);
    }

    #[test]
    fn records_issued_commands() {
        let mut link = ScriptedLink::new(vec![ScriptedStep::new(vec![veh("a", 0.0)])]);
        link.advance_step().unwrap();
        link.change_target("a", "slot_edge").unwrap();
        assert_eq!(link.issued, [("a".to_owned(), "slot_edge".to_owned())]);
    }

    #[test]
    fn close_is_sticky() {
        let mut link = ScriptedLink::new(vec![ScriptedStep {
            vehicles:    vec![],
            lane_counts: HashMap::new(),
        }]);
        link.close().unwrap();
        assert!(link.closed);
        assert!(matches!(link.advance_step(), Err(TraciError::Closed)));
    }
}
