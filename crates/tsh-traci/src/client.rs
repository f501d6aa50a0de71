//! `TraciLink` — a live TraCI session over TCP against a spawned SUMO process.
//!
//! # Connection sequence
//!
//! 1. Pick a port (configured, or an OS-assigned free one).
//! 2. Spawn `sumo -c <scenario> --remote-port <port>`.
//! 3. Poll-connect to the port while SUMO boots (bounded attempts).
//! 4. Exchange a `getVersion` handshake.
//!
//! Any failure in this sequence is fatal to the run — the caller gets the
//! error and the child process is reaped before returning.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::PathBuf;
use std::process::{Child, Command};
use std::time::Duration;

use log::{debug, info, warn};
use serde::Deserialize;

use tsh_core::{Point2, VehicleSnapshot};

use crate::link::SimulatorLink;
use crate::protocol::{self, ByteReader, ByteWriter, read_command_header};
use crate::{TraciError, TraciResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// How to launch and reach the SUMO process.
#[derive(Clone, Debug, Deserialize)]
pub struct SumoConfig {
    /// Simulator binary; `sumo-gui` also works for visual runs.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Path to the `.sumocfg` scenario file.
    pub scenario: PathBuf,

    /// TCP port for the control channel.  `None` lets the OS pick a free one.
    #[serde(default)]
    pub port: Option<u16>,

    /// Extra command-line arguments appended to the launch command.
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// How many times to poll-connect while SUMO boots.
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,

    /// Delay between connect attempts, in milliseconds.
    #[serde(default = "default_connect_retry_ms")]
    pub connect_retry_ms: u64,
}

fn default_binary() -> String {
    "sumo".to_owned()
}

fn default_connect_attempts() -> u32 {
    50
}

fn default_connect_retry_ms() -> u64 {
    100
}

impl SumoConfig {
    pub fn new(scenario: impl Into<PathBuf>) -> Self {
        Self {
            binary:           default_binary(),
            scenario:         scenario.into(),
            port:             None,
            extra_args:       Vec::new(),
            connect_attempts: default_connect_attempts(),
            connect_retry_ms: default_connect_retry_ms(),
        }
    }
}

// ── TraciLink ─────────────────────────────────────────────────────────────────

/// An open TraCI session.  Owns both the TCP stream and the child process.
pub struct TraciLink {
    stream: TcpStream,
    child:  Child,
    closed: bool,
}

impl TraciLink {
    /// Spawn SUMO and establish the control session.
    pub fn connect(config: &SumoConfig) -> TraciResult<Self> {
        let port = match config.port {
            Some(p) => p,
            None => free_port()?,
        };
        let addr = format!("127.0.0.1:{port}");

        let mut child = Command::new(&config.binary)
            .arg("-c")
            .arg(&config.scenario)
            .arg("--remote-port")
            .arg(port.to_string())
            .args(&config.extra_args)
            .spawn()
            .map_err(|source| TraciError::Launch {
                binary: config.binary.clone(),
                source,
            })?;

        let stream = match poll_connect(&addr, config.connect_attempts, config.connect_retry_ms) {
            Ok(s) => s,
            Err(e) => {
                // The child never opened its port; don't leave it behind.
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };
        stream.set_nodelay(true)?;

        let mut link = Self { stream, child, closed: false };
        match link.handshake() {
            Ok((api, version)) => {
                info!("connected to {version} (TraCI API {api}) on {addr}");
                Ok(link)
            }
            Err(e) => {
                let _ = link.close();
                Err(e)
            }
        }
    }

    /// `getVersion` round-trip; confirms the peer actually speaks TraCI.
    fn handshake(&mut self) -> TraciResult<(i32, String)> {
        let payload = self.transact(protocol::CMD_GETVERSION, &[])?;
        let mut r = ByteReader::new(&payload);
        let (id, _) = read_command_header(&mut r)?;
        if id != protocol::CMD_GETVERSION {
            return Err(TraciError::Protocol(format!(
                "unexpected handshake response command {id:#04x}"
            )));
        }
        let api = r.read_i32()?;
        let version = r.read_string()?;
        Ok((api, version))
    }

    // ── Request/response plumbing ─────────────────────────────────────────

    /// Send one command, verify its status, return the bytes that follow.
    fn transact(&mut self, id: u8, content: &[u8]) -> TraciResult<Vec<u8>> {
        if self.closed {
            return Err(TraciError::Closed);
        }
        let msg = protocol::encode_message(&[protocol::encode_command(id, content)]);
        self.stream.write_all(&msg)?;

        let body = self.read_message()?;
        let mut r = ByteReader::new(&body);
        let (status_id, _) = read_command_header(&mut r)?;
        if status_id != id {
            return Err(TraciError::Protocol(format!(
                "status for command {status_id:#04x}, expected {id:#04x}"
            )));
        }
        let result = r.read_u8()?;
        let description = r.read_string()?;
        if result != protocol::RTYPE_OK {
            return Err(TraciError::Server { command: id, message: description });
        }
        Ok(r.rest().to_vec())
    }

    fn read_message(&mut self) -> TraciResult<Vec<u8>> {
        let mut len = [0u8; 4];
        self.stream.read_exact(&mut len)?;
        let total = i32::from_be_bytes(len);
        if total < 4 {
            return Err(TraciError::Protocol(format!("bad message length {total}")));
        }
        let mut body = vec![0u8; total as usize - 4];
        self.stream.read_exact(&mut body)?;
        Ok(body)
    }

    // ── Typed get-variable helpers ────────────────────────────────────────

    fn get_variable(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<Vec<u8>> {
        let mut w = ByteWriter::new();
        w.write_u8(var).write_string(object);
        self.transact(cmd, &w.into_bytes())
    }

    fn get_double(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<f64> {
        let payload = self.get_variable(cmd, var, object)?;
        let mut r = value_reader(&payload, cmd, var, protocol::TYPE_DOUBLE)?;
        r.read_f64()
    }

    fn get_i32(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<i32> {
        let payload = self.get_variable(cmd, var, object)?;
        let mut r = value_reader(&payload, cmd, var, protocol::TYPE_INTEGER)?;
        r.read_i32()
    }

    fn get_string(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<String> {
        let payload = self.get_variable(cmd, var, object)?;
        let mut r = value_reader(&payload, cmd, var, protocol::TYPE_STRING)?;
        r.read_string()
    }

    fn get_string_list(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<Vec<String>> {
        let payload = self.get_variable(cmd, var, object)?;
        let mut r = value_reader(&payload, cmd, var, protocol::TYPE_STRINGLIST)?;
        r.read_string_list()
    }

    fn get_position(&mut self, cmd: u8, var: u8, object: &str) -> TraciResult<Point2> {
        let payload = self.get_variable(cmd, var, object)?;
        let mut r = value_reader(&payload, cmd, var, protocol::POSITION_2D)?;
        let x = r.read_f64()?;
        let y = r.read_f64()?;
        Ok(Point2::new(x, y))
    }
}

/// Parse a get-variable response down to its value bytes.
fn value_reader<'a>(
    payload: &'a [u8],
    cmd:     u8,
    var:     u8,
    vtype:   u8,
) -> TraciResult<ByteReader<'a>> {
    let mut r = ByteReader::new(payload);
    let (id, _) = read_command_header(&mut r)?;
    let expected = cmd.wrapping_add(protocol::RESPONSE_OFFSET);
    if id != expected {
        return Err(TraciError::Protocol(format!(
            "response command {id:#04x}, expected {expected:#04x}"
        )));
    }
    let got_var = r.read_u8()?;
    if got_var != var {
        return Err(TraciError::Protocol(format!(
            "response for variable {got_var:#04x}, expected {var:#04x}"
        )));
    }
    let _object = r.read_string()?;
    let got_type = r.read_u8()?;
    if got_type != vtype {
        return Err(TraciError::Protocol(format!(
            "value type {got_type:#04x}, expected {vtype:#04x}"
        )));
    }
    Ok(r)
}

// ── SimulatorLink impl ────────────────────────────────────────────────────────

impl SimulatorLink for TraciLink {
    fn advance_step(&mut self) -> TraciResult<()> {
        // Target time 0.0 = "advance one step".  The payload after the status
        // is the subscription result block; the harness subscribes to nothing,
        // so it is ignored wholesale.
        let _ = self.transact(protocol::CMD_SIMSTEP, &0.0f64.to_be_bytes())?;
        Ok(())
    }

    fn list_vehicles(&mut self) -> TraciResult<Vec<String>> {
        self.get_string_list(protocol::CMD_GET_VEHICLE_VARIABLE, protocol::VAR_ID_LIST, "")
    }

    fn vehicle_state(&mut self, id: &str) -> TraciResult<VehicleSnapshot> {
        let cmd = protocol::CMD_GET_VEHICLE_VARIABLE;
        Ok(VehicleSnapshot {
            id:           id.to_owned(),
            position:     self.get_position(cmd, protocol::VAR_POSITION, id)?,
            speed:        self.get_double(cmd, protocol::VAR_SPEED, id)?,
            waiting_time: self.get_double(cmd, protocol::VAR_WAITING_TIME, id)?,
            lane:         self.get_string(cmd, protocol::VAR_LANE_ID, id)?,
            vehicle_type: self.get_string(cmd, protocol::VAR_TYPE_ID, id)?,
        })
    }

    fn lane_vehicle_count(&mut self, lane: &str) -> TraciResult<u32> {
        let n = self.get_i32(
            protocol::CMD_GET_LANE_VARIABLE,
            protocol::VAR_LAST_STEP_VEHICLE_NUMBER,
            lane,
        )?;
        u32::try_from(n)
            .map_err(|_| TraciError::Protocol(format!("negative vehicle count {n} on lane {lane}")))
    }

    fn lane_ids(&mut self) -> TraciResult<Vec<String>> {
        self.get_string_list(protocol::CMD_GET_LANE_VARIABLE, protocol::VAR_ID_LIST, "")
    }

    fn change_target(&mut self, vehicle: &str, edge: &str) -> TraciResult<()> {
        let mut w = ByteWriter::new();
        w.write_u8(protocol::CMD_CHANGE_TARGET)
            .write_string(vehicle)
            .write_u8(protocol::TYPE_STRING)
            .write_string(edge);
        let _ = self.transact(protocol::CMD_SET_VEHICLE_VARIABLE, &w.into_bytes())?;
        debug!("changeTarget: vehicle {vehicle} -> edge {edge}");
        Ok(())
    }

    fn close(&mut self) -> TraciResult<()> {
        if self.closed {
            return Ok(());
        }
        // Send the close command, then reap the child.  A dead socket here is
        // not worth failing the run over — the session is going away either
        // way — but the child must not be left running.
        let sent = self.transact(protocol::CMD_CLOSE, &[]);
        self.closed = true;
        let _ = self.stream.shutdown(Shutdown::Both);
        if let Err(e) = &sent {
            warn!("close command failed ({e}); killing simulator process");
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
        info!("simulator session closed");
        Ok(())
    }
}

impl Drop for TraciLink {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}

// ── Connection helpers ────────────────────────────────────────────────────────

/// Ask the OS for a currently free TCP port.
///
/// There is a small window between releasing the listener and SUMO binding
/// the port; in practice nothing else grabs it, and a collision surfaces as
/// a connect failure rather than silent misbehavior.
fn free_port() -> TraciResult<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}

/// Poll-connect while the simulator boots.
fn poll_connect(addr: &str, attempts: u32, retry_ms: u64) -> TraciResult<TcpStream> {
    for attempt in 1..=attempts {
        match TcpStream::connect(addr) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!("connect attempt {attempt}/{attempts} to {addr} failed: {e}");
                std::thread::sleep(Duration::from_millis(retry_ms));
            }
        }
    }
    Err(TraciError::Connect { addr: addr.to_owned(), attempts })
}
