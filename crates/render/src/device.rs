use crate::material::Material;
use glam::Mat4;
use orrery_common::RawHandle;
use orrery_resources::Mesh;

/// Depth comparison applied to mesh draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthCompare {
    #[default]
    Less,
    LessEqual,
}

/// Buffer handles for one mesh, as issued by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshBuffers {
    pub vao: RawHandle,
    pub vbo: RawHandle,
    pub ebo: RawHandle,
}

/// One indexed mesh draw, fully resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: Mesh,
    pub material: Material,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub depth_compare: DepthCompare,
}

/// One background cube draw. `depth_write` is always false so the skybox
/// never occludes foreground draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyboxCall {
    pub cube_map: RawHandle,
    pub brightness: f32,
    pub view: Mat4,
    pub projection: Mat4,
    pub depth_write: bool,
}

/// The narrow seam to the graphics driver.
///
/// Real ownership of GPU objects lives behind this trait; the renderer's
/// registry does bookkeeping only. A windowed backend implements this
/// against a live context; [`TraceDevice`] implements it in memory.
pub trait GpuDevice {
    /// Whether an active graphics context backs this device.
    fn context_alive(&self) -> bool;

    fn alloc_texture(&mut self) -> RawHandle;
    fn alloc_cube_map(&mut self) -> RawHandle;
    fn alloc_mesh_buffers(&mut self) -> MeshBuffers;

    fn release_texture(&mut self, handle: RawHandle);
    fn release_cube_map(&mut self, handle: RawHandle);
    fn release_mesh_buffers(&mut self, buffers: MeshBuffers);

    fn set_depth_compare(&mut self, compare: DepthCompare);
    fn submit_mesh(&mut self, call: DrawCall);
    fn submit_skybox(&mut self, call: SkyboxCall);

    /// Outstanding allocations. Zero after a clean teardown.
    fn total_allocated(&self) -> usize;
}

/// A recorded submission, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Submission {
    Mesh(DrawCall),
    Skybox(SkyboxCall),
}

/// In-memory device: hands out sequential handles, counts outstanding
/// allocations, and records every submission for inspection.
#[derive(Debug, Default)]
pub struct TraceDevice {
    context_alive: bool,
    next_handle: RawHandle,
    outstanding: usize,
    depth_compare: DepthCompare,
    submissions: Vec<Submission>,
}

impl TraceDevice {
    pub fn new() -> Self {
        Self {
            context_alive: true,
            next_handle: 1,
            ..Self::default()
        }
    }

    /// A device whose context never came up, for exercising the
    /// initialization failure path.
    pub fn without_context() -> Self {
        Self {
            context_alive: false,
            next_handle: 1,
            ..Self::default()
        }
    }

    /// Every submission recorded so far, in submission order.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Drain the submission log.
    pub fn drain_submissions(&mut self) -> Vec<Submission> {
        std::mem::take(&mut self.submissions)
    }

    /// Number of recorded mesh draws.
    pub fn mesh_draws(&self) -> usize {
        self.submissions
            .iter()
            .filter(|s| matches!(s, Submission::Mesh(_)))
            .count()
    }

    /// Number of recorded skybox draws.
    pub fn skybox_draws(&self) -> usize {
        self.submissions
            .iter()
            .filter(|s| matches!(s, Submission::Skybox(_)))
            .count()
    }

    pub fn depth_compare(&self) -> DepthCompare {
        self.depth_compare
    }

    fn next(&mut self) -> RawHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.outstanding += 1;
        handle
    }
}

impl GpuDevice for TraceDevice {
    fn context_alive(&self) -> bool {
        self.context_alive
    }

    fn alloc_texture(&mut self) -> RawHandle {
        self.next()
    }

    fn alloc_cube_map(&mut self) -> RawHandle {
        self.next()
    }

    fn alloc_mesh_buffers(&mut self) -> MeshBuffers {
        MeshBuffers {
            vao: self.next(),
            vbo: self.next(),
            ebo: self.next(),
        }
    }

    fn release_texture(&mut self, _handle: RawHandle) {
        self.outstanding -= 1;
    }

    fn release_cube_map(&mut self, _handle: RawHandle) {
        self.outstanding -= 1;
    }

    fn release_mesh_buffers(&mut self, _buffers: MeshBuffers) {
        self.outstanding -= 3;
    }

    fn set_depth_compare(&mut self, compare: DepthCompare) {
        self.depth_compare = compare;
    }

    fn submit_mesh(&mut self, call: DrawCall) {
        self.submissions.push(Submission::Mesh(call));
    }

    fn submit_skybox(&mut self, call: SkyboxCall) {
        self.submissions.push(Submission::Skybox(call));
    }

    fn total_allocated(&self) -> usize {
        self.outstanding
    }
}
