//! `tsh-policy` — the per-step decision logic of the harness.
//!
//! Policies are side-effect-free: they read a `StepSnapshot` and return
//! [`Command`]s, which the step loop applies through the simulator link.
//! That produce/apply split keeps every policy testable without a simulator.
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`policy`]  | The [`StepPolicy`] trait, [`NoopPolicy`]               |
//! | [`command`] | [`Command`] — actions a policy can request             |
//! | [`parking`] | Eligibility gate + random free-slot assignment         |
//! | [`proximity`] | Nearest-neighbor distances and threshold features    |
//!
//! # Cargo features
//!
//! | Feature         | Effect                                             |
//! |-----------------|----------------------------------------------------|
//! | `spatial-index` | R*-tree nearest-neighbor path in [`proximity`].    |

pub mod command;
pub mod parking;
pub mod policy;
pub mod proximity;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use command::Command;
pub use parking::{LaneFilter, ParkingConfig, ParkingPolicy, edge_of_lane};
pub use policy::{NoopPolicy, StepPolicy};
pub use proximity::{ProximityConfig, ProximityFeatures, classify};
