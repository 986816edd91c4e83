//! Renderer and the narrow seam to the graphics driver.
//!
//! # Invariants
//! - A [`Renderer`] value only exists between a successful `initialize`
//!   and `destroy`; the lifecycle is encoded in ownership, so draw calls
//!   outside the Initialized state do not compile.
//! - The skybox is always the first submission of a frame.
//! - Draw submission is synchronous and single-threaded; no two draws can
//!   observe a partially updated transform triple.
//!
//! The [`GpuDevice`] trait is where a concrete backend plugs in. The
//! in-tree [`TraceDevice`] records submissions and tracks outstanding
//! allocations; it serves tests and headless playback.

mod camera;
mod device;
mod material;
mod renderer;

pub use camera::Camera;
pub use device::{
    DepthCompare, DrawCall, GpuDevice, MeshBuffers, SkyboxCall, Submission, TraceDevice,
};
pub use material::Material;
pub use renderer::{RenderError, Renderer};
