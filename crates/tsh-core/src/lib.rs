//! `tsh-core` — foundational types for the `rust_tsh` traffic-sim harness.
//!
//! This crate is a dependency of every other `tsh-*` crate.  It intentionally
//! has no `tsh-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`step`]     | `Step` — the discrete simulation tick counter       |
//! | [`geo`]      | `Point2`, Euclidean distance                        |
//! | [`rng`]      | `SimRng` — seedable run-level RNG                   |
//! | [`snapshot`] | `VehicleSnapshot`, `StepSnapshot`                   |
//! | [`config`]   | `RunConfig`, TOML loading helpers                   |
//! | [`error`]    | `CoreError`, `CoreResult`                           |

pub mod config;
pub mod error;
pub mod geo;
pub mod rng;
pub mod snapshot;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RunConfig, from_toml_str, load_toml};
pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use rng::SimRng;
pub use snapshot::{StepSnapshot, VehicleSnapshot};
pub use step::Step;
