use crate::device::{DepthCompare, DrawCall, GpuDevice, SkyboxCall};
use crate::material::Material;
use glam::{EulerRot, Mat4, Vec3};
use orrery_resources::{CubeMapId, MeshId, PoolError, ResourcePool, TextureId};

/// Errors from renderer setup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no live graphics context")]
    NoContext,
}

/// The renderer: registry, active transform triple, draw submission.
///
/// Lifecycle is encoded in the type: [`Renderer::initialize`] is the only
/// constructor and [`Renderer::destroy`] consumes the value, so no draw
/// call can be issued before initialization or after teardown.
#[derive(Debug)]
pub struct Renderer<D: GpuDevice> {
    device: D,
    pool: ResourcePool,
    projection: Mat4,
    view: Mat4,
    model: Mat4,
    depth_compare: DepthCompare,
    submissions_this_frame: u32,
}

impl<D: GpuDevice> Renderer<D> {
    /// Prepare the render state over a live graphics context and establish
    /// the default depth comparison.
    pub fn initialize(mut device: D) -> Result<Self, RenderError> {
        if !device.context_alive() {
            return Err(RenderError::NoContext);
        }
        let depth_compare = DepthCompare::Less;
        device.set_depth_compare(depth_compare);
        tracing::info!("renderer initialized");
        Ok(Self {
            device,
            pool: ResourcePool::new(),
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            depth_compare,
            submissions_this_frame: 0,
        })
    }

    /// Allocate a texture from the driver and register it. The handle is
    /// released again if the table is full.
    pub fn create_texture(&mut self) -> Result<TextureId, PoolError> {
        let handle = self.device.alloc_texture();
        match self.pool.register_texture(handle) {
            Ok(id) => Ok(id),
            Err(e) => {
                self.device.release_texture(handle);
                Err(e)
            }
        }
    }

    /// Allocate a cube map from the driver and register it.
    pub fn create_cube_map(&mut self) -> Result<CubeMapId, PoolError> {
        let handle = self.device.alloc_cube_map();
        match self.pool.register_cube_map(handle) {
            Ok(id) => Ok(id),
            Err(e) => {
                self.device.release_cube_map(handle);
                Err(e)
            }
        }
    }

    /// Allocate mesh buffers from the driver and register the mesh.
    pub fn create_mesh(&mut self, draw_count: u32) -> Result<MeshId, PoolError> {
        let buffers = self.device.alloc_mesh_buffers();
        match self
            .pool
            .register_mesh(draw_count, buffers.vao, buffers.vbo, buffers.ebo)
        {
            Ok(id) => Ok(id),
            Err(e) => {
                self.device.release_mesh_buffers(buffers);
                Err(e)
            }
        }
    }

    /// Write the per-frame half of the transform triple and start a new
    /// frame's submission accounting.
    pub fn begin_frame(&mut self, view: Mat4, projection: Mat4) {
        self.view = view;
        self.projection = projection;
        self.submissions_this_frame = 0;
    }

    /// Submit one indexed mesh draw.
    ///
    /// The model matrix is translate * rotate * scale with elemental
    /// rotations applied X, then Y, then Z; this order is fixed because
    /// commuted rotations produce different orientations.
    ///
    /// # Panics
    /// An unregistered `mesh_id` is a caller contract violation.
    pub fn render_mesh(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        size: Vec3,
        mesh_id: MeshId,
        material: Material,
    ) {
        let mesh = *self
            .pool
            .mesh(mesh_id)
            .expect("render_mesh called with an unregistered mesh id");
        self.model = Mat4::from_translation(position)
            * Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
            * Mat4::from_scale(size);
        self.device.submit_mesh(DrawCall {
            mesh,
            material,
            model: self.model,
            view: self.view,
            projection: self.projection,
            depth_compare: self.depth_compare,
        });
        self.submissions_this_frame += 1;
    }

    /// Submit the background cube with depth-write disabled.
    ///
    /// Must be the first submission of every frame it appears in, so its
    /// place relative to mesh draws never varies.
    ///
    /// # Panics
    /// An unregistered `cube_map_id` is a caller contract violation.
    pub fn render_skybox(&mut self, cube_map_id: CubeMapId, brightness: f32) {
        let cube_map = self
            .pool
            .cube_map(cube_map_id)
            .expect("render_skybox called with an unregistered cube map id");
        debug_assert_eq!(
            self.submissions_this_frame, 0,
            "skybox must be the first submission of a frame"
        );
        self.device.submit_skybox(SkyboxCall {
            cube_map,
            brightness,
            view: self.view,
            projection: self.projection,
            depth_write: false,
        });
        self.submissions_this_frame += 1;
    }

    /// Read access to the registry.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Read access to the device, for inspection.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Release every pooled handle and tear the renderer down, returning
    /// the device so the caller can verify nothing is left allocated.
    pub fn destroy(mut self) -> D {
        for &handle in self.pool.textures() {
            self.device.release_texture(handle);
        }
        for &handle in self.pool.cube_maps() {
            self.device.release_cube_map(handle);
        }
        for mesh in self.pool.meshes() {
            self.device.release_mesh_buffers(crate::device::MeshBuffers {
                vao: mesh.vao,
                vbo: mesh.vbo,
                ebo: mesh.ebo,
            });
        }
        tracing::info!(
            textures = self.pool.texture_count(),
            cube_maps = self.pool.cube_map_count(),
            meshes = self.pool.mesh_count(),
            "renderer destroyed"
        );
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Submission, TraceDevice};
    use orrery_resources::{MAX_MESH, MAX_TEXTURE};

    fn renderer() -> Renderer<TraceDevice> {
        Renderer::initialize(TraceDevice::new()).unwrap()
    }

    #[test]
    fn initialize_requires_a_live_context() {
        let err = Renderer::initialize(TraceDevice::without_context()).unwrap_err();
        assert!(matches!(err, RenderError::NoContext));
    }

    #[test]
    fn initialize_sets_default_depth_compare() {
        let r = renderer();
        assert_eq!(r.device().depth_compare(), DepthCompare::Less);
    }

    #[test]
    fn create_mesh_registers_driver_buffers() {
        let mut r = renderer();
        let id = r.create_mesh(2880).unwrap();
        let mesh = r.pool().mesh(id).unwrap();
        assert_eq!(mesh.draw_count, 2880);
        // vao, vbo, ebo
        assert_eq!(r.device().total_allocated(), 3);
    }

    #[test]
    fn failed_registration_releases_the_handle() {
        let mut r = renderer();
        for _ in 0..MAX_TEXTURE {
            r.create_texture().unwrap();
        }
        assert!(r.create_texture().is_err());
        // The overflow allocation was handed back.
        assert_eq!(r.device().total_allocated(), MAX_TEXTURE);

        for _ in r.pool().mesh_count()..MAX_MESH {
            r.create_mesh(36).unwrap();
        }
        assert!(r.create_mesh(36).is_err());
        assert_eq!(r.device().total_allocated(), MAX_TEXTURE + MAX_MESH * 3);
    }

    #[test]
    fn render_mesh_submits_with_draw_count() {
        let mut r = renderer();
        let mesh_id = r.create_mesh(36).unwrap();
        let tex = r.create_texture().unwrap();

        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_mesh(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ZERO,
            Vec3::ONE,
            mesh_id,
            Material::lit(tex),
        );

        let subs = r.device().submissions();
        assert_eq!(subs.len(), 1);
        let Submission::Mesh(call) = subs[0] else {
            panic!("expected a mesh submission");
        };
        assert_eq!(call.mesh.draw_count, 36);
        assert_eq!(call.model.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(call.depth_compare, DepthCompare::Less);
    }

    #[test]
    fn model_matrix_applies_scale_before_rotation() {
        let mut r = renderer();
        let mesh_id = r.create_mesh(6).unwrap();
        let tex = r.create_texture().unwrap();

        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        let rotation = Vec3::new(0.3, 1.1, -0.4);
        r.render_mesh(Vec3::ZERO, rotation, Vec3::splat(2.0), mesh_id, Material::lit(tex));

        let Submission::Mesh(call) = r.device().submissions()[0] else {
            panic!("expected a mesh submission");
        };
        let expected =
            Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
                * Mat4::from_scale(Vec3::splat(2.0));
        assert!((call.model.x_axis - expected.x_axis).length() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "unregistered mesh id")]
    fn out_of_range_mesh_id_is_fatal() {
        let mut r = renderer();
        let tex = r.create_texture().unwrap();
        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_mesh(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, MeshId(5), Material::lit(tex));
    }

    #[test]
    fn skybox_never_writes_depth() {
        let mut r = renderer();
        let sky = r.create_cube_map().unwrap();
        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_skybox(sky, 0.8);

        let Submission::Skybox(call) = r.device().submissions()[0] else {
            panic!("expected a skybox submission");
        };
        assert!(!call.depth_write);
        assert_eq!(call.brightness, 0.8);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "first submission")]
    fn skybox_after_a_mesh_draw_is_a_contract_violation() {
        let mut r = renderer();
        let mesh_id = r.create_mesh(6).unwrap();
        let tex = r.create_texture().unwrap();
        let sky = r.create_cube_map().unwrap();

        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_mesh(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, mesh_id, Material::lit(tex));
        r.render_skybox(sky, 1.0);
    }

    #[test]
    fn begin_frame_resets_the_submission_counter() {
        let mut r = renderer();
        let mesh_id = r.create_mesh(6).unwrap();
        let tex = r.create_texture().unwrap();
        let sky = r.create_cube_map().unwrap();

        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_skybox(sky, 1.0);
        r.render_mesh(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, mesh_id, Material::lit(tex));

        // A fresh frame accepts the skybox again.
        r.begin_frame(Mat4::IDENTITY, Mat4::IDENTITY);
        r.render_skybox(sky, 1.0);
        assert_eq!(r.device().skybox_draws(), 2);
    }

    #[test]
    fn destroy_releases_everything() {
        let mut r = renderer();
        r.create_texture().unwrap();
        r.create_texture().unwrap();
        r.create_cube_map().unwrap();
        r.create_mesh(36).unwrap();
        assert_eq!(r.device().total_allocated(), 6);

        let device = r.destroy();
        assert_eq!(device.total_allocated(), 0);
    }

    #[test]
    fn frame_view_projection_flow_into_draws() {
        let mut r = renderer();
        let mesh_id = r.create_mesh(6).unwrap();
        let tex = r.create_texture().unwrap();

        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let projection = Mat4::perspective_rh(1.0, 16.0 / 9.0, 0.1, 1000.0);
        r.begin_frame(view, projection);
        r.render_mesh(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, mesh_id, Material::lit(tex));

        let Submission::Mesh(call) = r.device().submissions()[0] else {
            panic!("expected a mesh submission");
        };
        assert_eq!(call.view, view);
        assert_eq!(call.projection, projection);
    }
}
