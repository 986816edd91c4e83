//! Shared types for the orrery scene player.
//!
//! # Invariants
//! - `RawHandle` is opaque bookkeeping; real ownership of GPU objects
//!   lives in the graphics driver behind the device seam.

pub mod types;

pub use types::{RawHandle, Transform};
