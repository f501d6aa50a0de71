//! Simulation step model.
//!
//! Time is represented as a monotonically increasing `Step` counter — one
//! step per `simulationStep` call on the TraCI channel.  With the usual SUMO
//! configuration one step is one simulated second, but nothing in the harness
//! depends on that mapping: all recording arithmetic is done on the integer
//! counter, so there is no floating-point drift between the loop and the
//! telemetry table.

use std::fmt;

/// An absolute simulation step counter.
///
/// Stored as `u64`; step budgets in practice are in the hundreds, so overflow
/// is not a concern.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` ticks after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
