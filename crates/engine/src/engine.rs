use crate::config::PlayerConfig;
use crate::window::{Poll, Window, WindowError};
use glam::Vec3;
use orrery_input::{Action, EdgeDetector};
use orrery_render::{Camera, GpuDevice, Material, RenderError, Renderer};
use orrery_resources::{CubeMapId, MeshId, PoolError, TextureId};
use orrery_sim::{Scene, SimClock, FOLLOW_DISTANCE, SPIN_RATE};
use std::time::Instant;

/// Index counts of the two author-defined meshes.
const SPHERE_INDEX_COUNT: u32 = 2880;
const PROBE_INDEX_COUNT: u32 = 4320;

/// Skybox brightness multiplier.
const SKY_BRIGHTNESS: f32 = 1.0;

/// Initial camera position.
const CAMERA_START: Vec3 = Vec3::new(13.0, 3.0, 9.0);

/// Errors from engine startup and teardown.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("{outstanding} GPU allocations outstanding after teardown")]
    ResourceLeak { outstanding: usize },
}

/// Ids of everything the scene registers during setup.
#[derive(Debug, Clone, Copy)]
pub struct SceneHandles {
    pub sphere: MeshId,
    pub probe_mesh: MeshId,
    pub sky: CubeMapId,
    pub sun_tex: TextureId,
    pub comet_tex: TextureId,
    pub planet_tex: TextureId,
    pub moon_tex: TextureId,
    pub probe_tex: TextureId,
}

/// Register the fixed scene's GPU resources.
pub fn register_scene<D: GpuDevice>(
    renderer: &mut Renderer<D>,
) -> Result<SceneHandles, PoolError> {
    Ok(SceneHandles {
        sphere: renderer.create_mesh(SPHERE_INDEX_COUNT)?,
        probe_mesh: renderer.create_mesh(PROBE_INDEX_COUNT)?,
        sky: renderer.create_cube_map()?,
        sun_tex: renderer.create_texture()?,
        comet_tex: renderer.create_texture()?,
        planet_tex: renderer.create_texture()?,
        moon_tex: renderer.create_texture()?,
        probe_tex: renderer.create_texture()?,
    })
}

/// The frame loop driver.
///
/// Owns the window, renderer, camera, and simulation state exclusively;
/// everything is mutated on the loop thread, one tick at a time.
pub struct Engine<W: Window, D: GpuDevice> {
    window: W,
    renderer: Renderer<D>,
    camera: Camera,
    clock: SimClock,
    edges: EdgeDetector,
    handles: SceneHandles,
    running: bool,
    follow_probe: bool,
    spin: f32,
    mouse: (f32, f32),
    clear_color: [f32; 3],
    aspect: f32,
    frames: u64,
}

impl<W: Window, D: GpuDevice> Engine<W, D> {
    /// Assemble the driver over an already-open window and an initialized
    /// renderer with the scene registered.
    pub fn new(
        window: W,
        renderer: Renderer<D>,
        handles: SceneHandles,
        config: &PlayerConfig,
    ) -> Self {
        Self {
            window,
            renderer,
            camera: Camera::new(CAMERA_START),
            clock: SimClock::new(),
            edges: EdgeDetector::new(),
            handles,
            running: true,
            follow_probe: false,
            spin: 0.0,
            mouse: (0.0, 0.0),
            clear_color: config.clear_color,
            aspect: config.window.aspect(),
            frames: 0,
        }
    }

    /// One frame. `raw_delta` is the wall-clock seconds since the previous
    /// tick; it is clamped before use. Returns false once the loop should
    /// stop.
    pub fn tick(&mut self, raw_delta: f32) -> bool {
        if self.window.poll() == Poll::Quit {
            self.running = false;
            return false;
        }

        self.clock.advance(raw_delta);

        let keys = *self.window.keys();
        if self.edges.fired(&keys, Action::TogglePlayback) {
            self.clock.toggle_playing();
        }
        if self.edges.fired(&keys, Action::Quit) {
            self.running = false;
        }
        if self.edges.fired(&keys, Action::ToggleFullscreen) {
            self.window.toggle_fullscreen();
        }
        if self.edges.fired(&keys, Action::SlowTime) {
            self.clock.slow_down();
        }
        if self.edges.fired(&keys, Action::HastenTime) {
            self.clock.speed_up();
        }
        if self.edges.fired(&keys, Action::ResetTimeScale) {
            self.clock.reset_scale();
        }
        if self.edges.fired(&keys, Action::ToggleFollow) {
            self.follow_probe = !self.follow_probe;
            tracing::info!(follow = self.follow_probe, "follow camera toggled");
        }
        self.edges.retire(&keys);

        self.mouse = self.window.cursor();
        self.camera.update();

        let frame = Scene::evaluate(self.clock.total(), self.spin);

        if self.follow_probe {
            self.camera.position =
                frame.probe.position - self.camera.forward() * FOLLOW_DISTANCE;
        }

        self.renderer.begin_frame(
            self.camera.view_matrix(),
            self.camera.projection_matrix(self.aspect),
        );

        // Fixed draw order: skybox first, sun last.
        self.renderer.render_skybox(self.handles.sky, SKY_BRIGHTNESS);
        self.renderer.render_mesh(
            frame.comet.position,
            frame.comet.rotation,
            frame.comet.scale,
            self.handles.sphere,
            Material::lit(self.handles.comet_tex),
        );
        self.renderer.render_mesh(
            frame.planet.position,
            frame.planet.rotation,
            frame.planet.scale,
            self.handles.sphere,
            Material::lit(self.handles.planet_tex),
        );
        self.renderer.render_mesh(
            frame.moon.position,
            frame.moon.rotation,
            frame.moon.scale,
            self.handles.sphere,
            Material::lit(self.handles.moon_tex),
        );
        self.renderer.render_mesh(
            frame.probe.position,
            frame.probe.rotation,
            frame.probe.scale,
            self.handles.probe_mesh,
            Material::lit(self.handles.probe_tex),
        );
        self.renderer.render_mesh(
            frame.sun.position,
            frame.sun.rotation,
            frame.sun.scale,
            self.handles.sphere,
            Material::emissive(self.handles.sun_tex, 1.0),
        );

        self.spin += SPIN_RATE * self.clock.delta();

        self.window.swap_buffers();
        let [r, g, b] = self.clear_color;
        self.window.clear_buffers(r, g, b);
        self.frames += 1;

        self.running
    }

    /// Tick until the window signals termination or quit is requested.
    pub fn run(&mut self) {
        let mut prev = Instant::now();
        while self.running {
            let now = Instant::now();
            let raw_delta = (now - prev).as_secs_f32();
            prev = now;
            if !self.tick(raw_delta) {
                break;
            }
        }
        tracing::info!(frames = self.frames, "frame loop finished");
    }

    /// Close the window and tear the renderer down, returning both ends
    /// for post-shutdown inspection.
    pub fn finish(mut self) -> (W, D) {
        self.window.close();
        let device = self.renderer.destroy();
        (self.window, device)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &Renderer<D> {
        &self.renderer
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    pub fn mouse(&self) -> (f32, f32) {
        self.mouse
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn following(&self) -> bool {
        self.follow_probe
    }
}

/// Result of a completed playback.
#[derive(Debug)]
pub struct Playback<W, D> {
    pub window: W,
    pub device: D,
    pub frames: u64,
}

/// Open the window, initialize the renderer, register the scene, run the
/// loop, and tear everything down.
///
/// A window-open failure aborts before the loop runs. A nonzero count of
/// outstanding GPU allocations after teardown is reported as
/// [`EngineError::ResourceLeak`] rather than aborting the process.
pub fn play<W: Window, D: GpuDevice>(
    mut window: W,
    device: D,
    config: &PlayerConfig,
) -> Result<Playback<W, D>, EngineError> {
    window.open(&config.window)?;
    let mut renderer = Renderer::initialize(device)?;
    let handles = register_scene(&mut renderer)?;

    let mut engine = Engine::new(window, renderer, handles, config);
    engine.run();
    let frames = engine.frames();
    let (window, device) = engine.finish();

    let outstanding = device.total_allocated();
    if outstanding != 0 {
        tracing::error!(outstanding, "resource leak at shutdown");
        return Err(EngineError::ResourceLeak { outstanding });
    }

    Ok(Playback {
        window,
        device,
        frames,
    })
}
