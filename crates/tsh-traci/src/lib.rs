//! `tsh-traci` — connection adapter between the harness and a SUMO process.
//!
//! The external simulator is an opaque collaborator reached over TraCI's
//! request/response control channel.  This crate owns that seam:
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`link`]     | The [`SimulatorLink`] trait — the polling interface    |
//! | [`protocol`] | TraCI wire framing: command ids, value codec           |
//! | [`client`]   | [`TraciLink`] — spawns `sumo`, speaks TraCI over TCP   |
//! | [`scripted`] | [`ScriptedLink`] — in-memory replay for tests          |
//! | [`error`]    | `TraciError`, `TraciResult`                            |
//!
//! # Session lifecycle
//!
//! A session is a single linear sequence: connect → (step × N) → close.
//! Connection failure is fatal — there is no retry beyond the initial boot
//! poll while SUMO opens its listening port.  `close` must run even on the
//! error path so the external process is never orphaned; [`TraciLink`] backs
//! this up with a best-effort close on `Drop`.

pub mod client;
pub mod error;
pub mod link;
pub mod protocol;
pub mod scripted;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use client::{SumoConfig, TraciLink};
pub use error::{TraciError, TraciResult};
pub use link::SimulatorLink;
pub use scripted::{ScriptedLink, ScriptedStep};
