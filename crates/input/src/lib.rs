//! Key table and edge-triggered action mapping.
//!
//! The window collaborator exposes a level-triggered boolean table: true
//! while a key is held. Edge detection is this crate's responsibility -- a
//! toggle must fire once per press, not once per tick held down.
//!
//! # Invariants
//! - An action fires only on the rising edge of its key.
//! - The binding from key to action is fixed.

pub mod action;

pub use action::{Action, EdgeDetector, Key, KeyTable};
