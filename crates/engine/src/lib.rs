//! Frame loop driver for the orrery scene player.
//!
//! # Invariants
//! - One tick per loop iteration, single-threaded; `running` is the only
//!   cancellation and is checked once per tick.
//! - A poll that reports termination ends the loop as a normal shutdown.
//! - Draw submissions happen in a fixed order every frame: skybox, comet,
//!   planet, moon, probe, sun.
//! - After teardown the device must report zero outstanding allocations.

pub mod config;
pub mod engine;
pub mod window;

pub use config::{ConfigError, PlayerConfig, WindowConfig};
pub use engine::{play, register_scene, Engine, EngineError, Playback, SceneHandles};
pub use window::{HeadlessWindow, Poll, Window, WindowError};
