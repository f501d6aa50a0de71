//! TraCI wire framing.
//!
//! The protocol is a simple length-prefixed binary format, big-endian
//! throughout:
//!
//! ```text
//! message  := i32 total_length (including these 4 bytes) , command*
//! command  := u8 length (including itself)               , u8 id , content
//!           | 0x00 , i32 ext_length (for commands > 255) , u8 id , content
//! ```
//!
//! Every request is answered with a status command (same id, result byte,
//! description string), optionally followed by result commands.  Get-variable
//! responses carry `id = request_id + 0x10`.
//!
//! Only the subset of commands and atomic value types the harness needs is
//! implemented; SUMO owns the rest of the surface.

use crate::{TraciError, TraciResult};

// ── Command ids ───────────────────────────────────────────────────────────────

pub const CMD_GETVERSION:          u8 = 0x00;
pub const CMD_SIMSTEP:             u8 = 0x02;
pub const CMD_CLOSE:               u8 = 0x7f;
pub const CMD_GET_LANE_VARIABLE:   u8 = 0xa3;
pub const CMD_GET_VEHICLE_VARIABLE: u8 = 0xa4;
pub const CMD_SET_VEHICLE_VARIABLE: u8 = 0xc4;

/// Get-variable responses answer with `request id + RESPONSE_OFFSET`.
pub const RESPONSE_OFFSET: u8 = 0x10;

// ── Variable ids ──────────────────────────────────────────────────────────────

pub const VAR_ID_LIST:                  u8 = 0x00;
pub const VAR_LAST_STEP_VEHICLE_NUMBER: u8 = 0x10;
pub const VAR_SPEED:                    u8 = 0x40;
pub const VAR_POSITION:                 u8 = 0x42;
pub const VAR_TYPE_ID:                  u8 = 0x4f;
pub const VAR_LANE_ID:                  u8 = 0x51;
pub const VAR_WAITING_TIME:             u8 = 0x7a;

/// `vehicle.changeTarget` is issued as a set-variable with this id.
pub const CMD_CHANGE_TARGET: u8 = 0x31;

// ── Value type ids ────────────────────────────────────────────────────────────

pub const POSITION_2D:     u8 = 0x01;
pub const TYPE_INTEGER:    u8 = 0x09;
pub const TYPE_DOUBLE:     u8 = 0x0b;
pub const TYPE_STRING:     u8 = 0x0c;
pub const TYPE_STRINGLIST: u8 = 0x0e;

// ── Status results ────────────────────────────────────────────────────────────

/// Any other result byte is a rejection; the status description says why.
pub const RTYPE_OK: u8 = 0x00;

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Append-only byte buffer for building command content.
#[derive(Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn write_i32(&mut self, v: i32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    pub fn write_f64(&mut self, v: f64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) -> &mut Self {
        self.write_i32(s.len() as i32);
        self.buf.extend_from_slice(s.as_bytes());
        self
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Frame one command: length byte (or extended length), id, content.
pub fn encode_command(id: u8, content: &[u8]) -> Vec<u8> {
    let total = 2 + content.len();
    let mut out = Vec::with_capacity(total + 4);
    if total <= u8::MAX as usize {
        out.push(total as u8);
    } else {
        out.push(0);
        out.extend_from_slice(&((total + 4) as i32).to_be_bytes());
    }
    out.push(id);
    out.extend_from_slice(content);
    out
}

/// Frame a full message: 4-byte total length followed by the commands.
pub fn encode_message(commands: &[Vec<u8>]) -> Vec<u8> {
    let body: usize = commands.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(4 + body);
    out.extend_from_slice(&((4 + body) as i32).to_be_bytes());
    for c in commands {
        out.extend_from_slice(c);
    }
    out
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Cursor over a received message body.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> TraciResult<&'a [u8]> {
        if self.pos + n > self.buf.len() {
            return Err(TraciError::Protocol(format!(
                "truncated message: wanted {n} bytes at offset {}, have {}",
                self.pos,
                self.buf.len() - self.pos
            )));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> TraciResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i32(&mut self) -> TraciResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f64(&mut self) -> TraciResult<f64> {
        let b = self.take(8)?;
        Ok(f64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    pub fn read_string(&mut self) -> TraciResult<String> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(TraciError::Protocol(format!("negative string length {len}")));
        }
        let bytes = self.take(len as usize)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| TraciError::Protocol(format!("invalid UTF-8 in string: {e}")))
    }

    pub fn read_string_list(&mut self) -> TraciResult<Vec<String>> {
        let count = self.read_i32()?;
        if count < 0 {
            return Err(TraciError::Protocol(format!("negative list length {count}")));
        }
        let mut out = Vec::with_capacity(count as usize);
        for _ in 0..count {
            out.push(self.read_string()?);
        }
        Ok(out)
    }

    /// Everything not yet consumed.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }
}

/// Read a command header; returns `(id, content_length)`.
///
/// Handles both the 1-byte and the extended (`0x00` + i32) length forms —
/// id-list responses on large networks routinely exceed 255 bytes.
pub fn read_command_header(r: &mut ByteReader<'_>) -> TraciResult<(u8, usize)> {
    let short = r.read_u8()? as usize;
    let (total, header) = if short == 0 {
        let ext = r.read_i32()?;
        if ext < 6 {
            return Err(TraciError::Protocol(format!("bad extended command length {ext}")));
        }
        (ext as usize, 5)
    } else {
        if short < 2 {
            return Err(TraciError::Protocol(format!("bad command length {short}")));
        }
        (short, 1)
    };
    let id = r.read_u8()?;
    Ok((id, total - header - 1))
}
