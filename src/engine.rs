//! Core engine tying state, input, and the render passes together.
//!
//! Owns everything below the window layer: GPU context, scene
//! resources, per-frame update logic, and state persistence. The
//! viewer feeds it translated input events and drives `update` /
//! `render` once per frame.

use std::path::Path;
use std::time::Instant;

use glam::{Mat4, Quat, Vec3};

use crate::camera::CameraBinding;
use crate::error::StarviewError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture;
use crate::input::{InputEvent, InputState};
use crate::lighting::Lighting;
use crate::options::Options;
use crate::renderer::{ModelStack, ScenePass, SkyboxPass, TonemapPass};
use crate::scene::Scene;
use crate::state::{AppState, ToggleAction};
use crate::util::FrameTiming;

/// Persisted program state lives next to the executable.
pub const STATE_FILE: &str = "starview_state.txt";
/// Optional tunables file.
pub const OPTIONS_FILE: &str = "starview.toml";

/// Everything needed to update and render one frame.
pub struct SceneEngine {
    context: RenderContext,
    pub state: AppState,
    options: Options,
    input: InputState,
    camera_binding: CameraBinding,
    lighting: Lighting,
    scene: Scene,
    scene_pass: ScenePass,
    skybox_pass: SkyboxPass,
    tonemap: TonemapPass,
    models: ModelStack,
    depth_view: wgpu::TextureView,
    frame_timing: FrameTiming,
    /// Scene clock driving the light orbit, in seconds.
    elapsed: f32,
    last_overlay_log: Instant,
}

impl SceneEngine {
    /// Initialize the GPU context and all scene resources.
    ///
    /// # Errors
    ///
    /// Returns [`StarviewError::Gpu`] if GPU initialization fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, StarviewError> {
        let options = Options::load_or_default(Path::new(OPTIONS_FILE));
        let state = AppState::load_or_default(Path::new(STATE_FILE), &options);

        let context = RenderContext::new(window, initial_size).await?;

        let camera_binding = CameraBinding::new(&context);
        let mut lighting = Lighting::new(&context, &options.lighting);
        lighting.set_blinn(state.blinn);
        let models = ModelStack::new(&context);

        let scene_pass = ScenePass::new(
            &context,
            &camera_binding.layout,
            &lighting.layout,
            &models.layout,
        );
        let scene = Scene::new(&context, &scene_pass.material_layout);
        let skybox_pass = SkyboxPass::new(&context, &camera_binding.layout, &scene.sky);

        let mut tonemap = TonemapPass::new(&context);
        tonemap.params.exposure = options.post_processing.exposure;
        tonemap.params.hdr_enabled = u32::from(state.hdr_enabled);

        let (_, depth_view) = texture::create_depth_texture(&context);

        Ok(Self {
            context,
            state,
            options,
            input: InputState::new(),
            camera_binding,
            lighting,
            scene,
            scene_pass,
            skybox_pass,
            tonemap,
            models,
            depth_view,
            frame_timing: FrameTiming::new(),
            elapsed: 0.0,
            last_overlay_log: Instant::now(),
        })
    }

    /// Fold one input event into the engine. Toggle keys act on the
    /// press edge; everything else accumulates in the input tracker.
    ///
    /// Returns `true` when the overlay flag flipped, so the caller can
    /// update the window's cursor grab to match.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Key { key, pressed } = event {
            if !self.input.press_edge(key, pressed) {
                return false;
            }
            match self.state.apply_toggle(key) {
                Some(ToggleAction::Blinn) => {
                    self.lighting.set_blinn(self.state.blinn);
                    log::info!(
                        "specular model: {}",
                        if self.state.blinn { "blinn-phong" } else { "phong" }
                    );
                }
                Some(ToggleAction::Hdr) => {
                    self.tonemap.params.hdr_enabled = u32::from(self.state.hdr_enabled);
                    log::info!("hdr tonemapping: {}", self.state.hdr_enabled);
                }
                Some(ToggleAction::Overlay) => {
                    // Re-capturing the cursor must not replay the jump
                    // it made while released.
                    self.input.reset_cursor();
                    return true;
                }
                None => {}
            }
            return false;
        }
        self.input.handle_event(event);
        false
    }

    /// Advance the simulation by `dt` seconds: camera motion, light
    /// orbit, and the periodic overlay readout.
    pub fn update(&mut self, dt: f32) {
        self.state.apply_input(&mut self.input, dt);

        self.elapsed += dt;
        self.lighting.orbit(self.elapsed);

        if self.state.overlay_enabled {
            self.log_overlay();
        }
    }

    /// Render one frame: scene and skybox into the HDR target, then
    /// the tonemap composite to the swapchain.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain needs
    /// reconfiguration; the caller resizes and retries next frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let aspect = self.context.aspect();
        self.camera_binding
            .update_gpu(&self.context.queue, &self.state.camera, aspect);
        self.lighting.update_gpu(&self.context.queue);
        self.tonemap.update_gpu(&self.context.queue);
        self.write_model_transforms();

        let frame = self.context.get_next_frame()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let clear = self.state.clear_color;
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.tonemap.hdr_target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.x),
                            g: f64::from(clear.y),
                            b: f64::from(clear.z),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.scene_pass.begin(
                &mut rp,
                &self.camera_binding.bind_group,
                &self.lighting.bind_group,
            );
            let draws = [
                (0, &self.scene.floor, &self.scene.plane),
                (1, &self.scene.fabric, &self.scene.cube),
                (2, &self.scene.fabric, &self.scene.cube),
                (3, &self.scene.matrix, &self.scene.cube),
                (4, &self.scene.hull, &self.scene.cube),
                (5, &self.scene.fabric, &self.scene.cube),
            ];
            for (slot, material, mesh) in draws {
                self.scene_pass.draw(
                    &mut rp,
                    &self.models.bind_group,
                    ModelStack::offset(slot),
                    material,
                    mesh,
                );
            }

            self.skybox_pass
                .draw(&mut rp, &self.camera_binding.bind_group, &self.scene.sky_mesh);
        }
        self.tonemap.render(&mut encoder, &surface_view);

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Upload this frame's model matrices. Slot order matches the draw
    /// list in [`render`](Self::render).
    fn write_model_transforms(&self) {
        let queue = &self.context.queue;
        // Ground plane.
        self.models.write(
            queue,
            0,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(0.0, -0.7, 0.0),
            ),
        );
        // Two fabric cubes flanking the walkway.
        self.models.write(
            queue,
            1,
            Mat4::from_translation(Vec3::new(-4.0, 0.0, -3.0)),
        );
        self.models
            .write(queue, 2, Mat4::from_translation(Vec3::new(4.0, 0.0, -3.0)));
        // The matrix cube.
        self.models.write(
            queue,
            3,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(-7.0, 0.3, -6.0),
            ),
        );
        // The ship stand-in, at its configurable pose.
        self.models.write(
            queue,
            4,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(self.state.ship_scale),
                Quat::IDENTITY,
                self.state.ship_position,
            ),
        );
        // One more fabric cube further out.
        self.models.write(
            queue,
            5,
            Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::IDENTITY,
                Vec3::new(2.0, 0.3, -9.0),
            ),
        );
    }

    /// Periodic stats readout while the overlay is up.
    fn log_overlay(&mut self) {
        let interval = self.options.overlay.log_interval_secs.max(0.1);
        if self.last_overlay_log.elapsed().as_secs_f32() < interval {
            return;
        }
        self.last_overlay_log = Instant::now();
        let camera = &self.state.camera;
        log::info!(
            "fps {:.1} | pos ({:.2}, {:.2}, {:.2}) | yaw {:.1} pitch {:.1} fov {:.1} | {} | hdr {}",
            self.frame_timing.fps(),
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.yaw(),
            camera.pitch(),
            camera.zoom(),
            if self.state.blinn { "blinn-phong" } else { "phong" },
            self.state.hdr_enabled,
        );
    }

    /// Reconfigure the surface and size-dependent targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        let (_, depth_view) = texture::create_depth_texture(&self.context);
        self.depth_view = depth_view;
        self.tonemap.resize(&self.context);
    }

    /// Persist the program state. Called on shutdown.
    pub fn save_state(&self) {
        if let Err(e) = self.state.save(Path::new(STATE_FILE)) {
            log::warn!("could not save state to {STATE_FILE}: {e}");
        }
    }
}
