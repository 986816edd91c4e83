//! Simulation clock and analytic orbital scene.
//!
//! # Invariants
//! - Simulated time accumulates `delta * scale` only while playing.
//! - The per-tick delta is clamped so a stall (breakpoint, window drag)
//!   cannot explode the simulation step.
//! - Body positions are pure functions of simulated time; the
//!   sun -> planet -> moon -> probe hierarchy is implicit in function
//!   composition, not a stored graph.

pub mod clock;
pub mod orbit;
pub mod scene;

pub use clock::{SimClock, MAX_DELTA, SCALE_DOWN_STEP, SCALE_RESET, SCALE_UP_STEP};
pub use orbit::Orbit;
pub use scene::{Body, Scene, SceneFrame, FOLLOW_DISTANCE, SPIN_RATE};
